//! # Menu Page
//!
//! Category tabs, the menu itself, and the cart with its checkout form.
//!
//! Load failures never surface: a failed category load leaves only the "All"
//! tab, a failed menu load shows an empty menu. Checkout failures do surface,
//! as [`MenuPage::error`].

use crate::api::MenuApi;
use crate::cart_actor::CartError;
use crate::checkout::{can_place, Checkout, CheckoutForm};
use crate::clients::CartClient;
use crate::model::{CartLine, CartTotals, Category, MenuItem, MenuItemId, Order};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A category filter tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryTab {
    #[default]
    All,
    Category(u32),
}

impl CategoryTab {
    pub fn category_id(self) -> Option<u32> {
        match self {
            CategoryTab::All => None,
            CategoryTab::Category(id) => Some(id),
        }
    }
}

/// The cart as the sidebar shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    /// Whether "Place Order" is enabled.
    pub can_place: bool,
}

pub struct MenuPage {
    api: Arc<dyn MenuApi>,
    cart: CartClient,
    checkout: Checkout,
    categories: Vec<Category>,
    active: CategoryTab,
    items: Vec<MenuItem>,
    placed: Option<Order>,
    error: Option<String>,
    /// Checkout form fields, edited directly.
    pub form: CheckoutForm,
}

impl MenuPage {
    pub fn new(api: Arc<dyn MenuApi>, cart: CartClient) -> Self {
        Self {
            checkout: Checkout::new(api.clone(), cart.clone()),
            api,
            cart,
            categories: Vec::new(),
            active: CategoryTab::All,
            items: Vec::new(),
            placed: None,
            error: None,
            form: CheckoutForm::default(),
        }
    }

    /// Fetches the categories and the menu for the active tab.
    pub async fn load(&mut self) {
        self.categories = match self.api.categories().await {
            Ok(categories) => categories,
            Err(e) => {
                warn!(error = %e, "Could not load categories");
                Vec::new()
            }
        };
        self.load_items().await;
    }

    async fn load_items(&mut self) {
        let category_id = self.active.category_id();
        self.items = match self.api.menu_items(category_id).await {
            Ok(items) => items,
            Err(e) => {
                warn!(?category_id, error = %e, "Could not load menu");
                Vec::new()
            }
        };
        debug!(?category_id, items = self.items.len(), "Menu loaded");
    }

    /// "All" followed by one tab per category, with their labels.
    pub fn tabs(&self) -> Vec<(CategoryTab, String)> {
        std::iter::once((CategoryTab::All, "All".to_string()))
            .chain(
                self.categories
                    .iter()
                    .map(|c| (CategoryTab::Category(c.id), c.name.clone())),
            )
            .collect()
    }

    pub fn active_tab(&self) -> CategoryTab {
        self.active
    }

    /// Switches tabs and re-fetches the menu for the new one.
    pub async fn select_category(&mut self, tab: CategoryTab) {
        if tab == self.active {
            return;
        }
        self.active = tab;
        self.load_items().await;
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// The order placed from this page, for the confirmation banner.
    pub fn placed(&self) -> Option<&Order> {
        self.placed.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Adds one of a listed item to the cart. Items not on the menu are ignored.
    pub async fn add_to_cart(&self, id: MenuItemId) -> Result<(), CartError> {
        let Some(item) = self.items.iter().find(|item| item.id == id) else {
            debug!(%id, "Not on the current menu");
            return Ok(());
        };
        self.cart.add_item(item.clone()).await?;
        Ok(())
    }

    /// Sets a line's quantity, clamped to at least 1.
    pub async fn change_quantity(&self, id: MenuItemId, quantity: u32) -> Result<(), CartError> {
        self.cart.set_quantity(id, quantity).await?;
        Ok(())
    }

    pub async fn increase(&self, id: MenuItemId) -> Result<(), CartError> {
        self.cart.increase(id).await?;
        Ok(())
    }

    pub async fn decrease(&self, id: MenuItemId) -> Result<(), CartError> {
        self.cart.decrease(id).await?;
        Ok(())
    }

    pub async fn remove(&self, id: MenuItemId) -> Result<(), CartError> {
        self.cart.remove(id).await?;
        Ok(())
    }

    pub async fn cart(&self) -> Result<CartView, CartError> {
        let lines = self.cart.lines().await?;
        Ok(CartView {
            totals: CartTotals::for_lines(&lines),
            can_place: can_place(&lines, &self.form),
            lines,
        })
    }

    /// Places the order if the action is enabled.
    ///
    /// Returns whether an order was placed. On success the cart is empty, the
    /// special instructions are reset and [`placed`](Self::placed) holds the
    /// order; on failure [`error`](Self::error) says why and the cart is kept.
    pub async fn place_order(&mut self) -> Result<bool, CartError> {
        let lines = self.cart.lines().await?;
        if !can_place(&lines, &self.form) {
            debug!(lines = lines.len(), "Place order is disabled");
            return Ok(false);
        }

        self.error = None;
        match self.checkout.place_order(&self.form).await {
            Ok(order) => {
                info!(order = %order.order_number, "Showing confirmation");
                self.placed = Some(order);
                self.form.special_instructions.clear();
                Ok(true)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Ok(false)
            }
        }
    }
}
