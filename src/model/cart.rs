/// A line in the shopping cart.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
/// Lines are keyed by their menu item, so adding an item that is already in the
/// cart merges into the existing line.
///
/// See [`impl ActorEntity for CartLine`](#impl-ActorEntity-for-CartLine) for details on:
/// - Creation parameters ([`CartLineCreate`])
/// - Update parameters ([`CartLineUpdate`])
/// - Custom actions ([`CartAction`](crate::cart_actor::CartAction))
use crate::model::{MenuItem, MenuItemId};

/// Sales tax rate, in percent.
pub const TAX_RATE_PERCENT: u64 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: MenuItem,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    pub fn id(&self) -> MenuItemId {
        self.item.id
    }

    /// Saturates instead of overflowing on absurd prices.
    pub fn line_total_cents(&self) -> u64 {
        self.item.price_cents.saturating_mul(u64::from(self.quantity))
    }
}

/// Payload for adding an item to the cart.
#[derive(Debug, Clone)]
pub struct CartLineCreate {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLineCreate {
    /// One more of `item`.
    pub fn one(item: MenuItem) -> Self {
        Self { item, quantity: 1 }
    }
}

/// Payload for setting a line's quantity. Values below 1 are clamped to 1.
#[derive(Debug, Clone)]
pub struct CartLineUpdate {
    pub quantity: u32,
}

/// Client-side order totals, in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal_cents: u64,
    pub tax_cents: u64,
    pub delivery_cents: u64,
    pub total_cents: u64,
}

impl CartTotals {
    /// Totals for `lines`. Delivery is free.
    pub fn for_lines(lines: &[CartLine]) -> Self {
        let subtotal_cents = lines
            .iter()
            .map(CartLine::line_total_cents)
            .fold(0u64, u64::saturating_add);
        let tax_cents = tax_for(subtotal_cents);
        let delivery_cents = 0;
        Self {
            subtotal_cents,
            tax_cents,
            delivery_cents,
            total_cents: subtotal_cents
                .saturating_add(tax_cents)
                .saturating_add(delivery_cents),
        }
    }
}

/// `subtotal * 8%`, rounded half up.
pub fn tax_for(subtotal_cents: u64) -> u64 {
    subtotal_cents
        .saturating_mul(TAX_RATE_PERCENT)
        .saturating_add(50)
        / 100
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u32, price_cents: u64, quantity: u32) -> CartLine {
        CartLine {
            item: MenuItem {
                id: MenuItemId(id),
                name: format!("item {id}"),
                description: None,
                price_cents,
                image_url: None,
                is_available: true,
                category_id: None,
            },
            quantity,
        }
    }

    #[test]
    fn totals_for_two_lines() {
        let totals = CartTotals::for_lines(&[line(1, 500, 2), line(2, 300, 1)]);
        assert_eq!(
            totals,
            CartTotals {
                subtotal_cents: 1300,
                tax_cents: 104,
                delivery_cents: 0,
                total_cents: 1404,
            }
        );
    }

    #[test]
    fn tax_rounds_half_up() {
        assert_eq!(tax_for(1250), 100);
        assert_eq!(tax_for(1256), 100); // 100.48
        assert_eq!(tax_for(1257), 101); // 100.56
        assert_eq!(tax_for(6), 0); // 0.48
        assert_eq!(tax_for(7), 1); // 0.56
    }

    #[test]
    fn extreme_amounts_saturate() {
        let huge = line(1, u64::MAX / 2, 3);
        assert_eq!(huge.line_total_cents(), u64::MAX);

        let totals = CartTotals::for_lines(&[huge, line(2, 500, 1)]);
        assert_eq!(totals.subtotal_cents, u64::MAX);
        assert_eq!(totals.tax_cents, u64::MAX / 100);
        assert_eq!(totals.total_cents, u64::MAX);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        assert_eq!(CartTotals::for_lines(&[]), CartTotals::default());
    }
}
