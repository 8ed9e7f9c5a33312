//! Plain-text screens for the terminal front-end.
//!
//! Every function here is pure: it takes what a page holds and returns the
//! text to print.

use crate::model::{CartTotals, Order};
use crate::pages::{AuthPage, CartView, MenuPage};
use crate::routes::{Route, Routes, NAV};
use crate::tracker::TrackerState;
use std::fmt::Write;

/// `1234` → `"$12.34"`.
pub fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Navigation bar; the link for `active` is bracketed.
pub fn header(active: &Route) -> String {
    let links: Vec<String> = NAV
        .iter()
        .map(|(label, path)| {
            if *path == active.path() {
                format!("[{label}] ({path})")
            } else {
                format!("{label} ({path})")
            }
        })
        .collect();
    format!("Ocean Eats | {}\n", links.join(" | "))
}

fn totals_block(out: &mut String, totals: &CartTotals) {
    let _ = writeln!(out, "  Subtotal  {}", format_cents(totals.subtotal_cents));
    let _ = writeln!(out, "  Tax       {}", format_cents(totals.tax_cents));
    let _ = writeln!(out, "  Delivery  {}", format_cents(totals.delivery_cents));
    let _ = writeln!(out, "  Total     {}", format_cents(totals.total_cents));
}

/// Tabs, menu, cart sidebar and the confirmation of a placed order.
pub fn menu_screen(page: &MenuPage, cart: &CartView, routes: &Routes) -> String {
    let mut out = header(&Route::Menu);

    if let Some(order) = page.placed() {
        confirmation(&mut out, order, routes);
    }
    if let Some(error) = page.error() {
        let _ = writeln!(out, "! {error}");
    }

    let tabs: Vec<String> = page
        .tabs()
        .into_iter()
        .map(|(tab, label)| {
            if tab == page.active_tab() {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect();
    let _ = writeln!(out, "\n{}\n", tabs.join("  "));

    if page.items().is_empty() {
        let _ = writeln!(out, "No items.");
    }
    for item in page.items() {
        let availability = if item.is_available { "" } else { "  (unavailable)" };
        let _ = writeln!(
            out,
            "{:>4}  {:<32} {:>8}{availability}",
            item.id.0,
            item.name,
            format_cents(item.price_cents)
        );
        if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "      {description}");
        }
    }

    let _ = writeln!(out, "\nYour Cart");
    if cart.lines.is_empty() {
        let _ = writeln!(out, "  Your cart is empty.");
    }
    for line in &cart.lines {
        let _ = writeln!(
            out,
            "  {} x{}  {}",
            line.item.name,
            line.quantity,
            format_cents(line.line_total_cents())
        );
    }
    totals_block(&mut out, &cart.totals);
    let _ = writeln!(
        out,
        "  Place Order: {}",
        if cart.can_place { "ready" } else { "disabled" }
    );
    out
}

fn confirmation(out: &mut String, order: &Order, routes: &Routes) {
    let _ = writeln!(out, "\nOrder placed! Your order number is {}.", order.order_number);
    let _ = writeln!(out, "Track it at {}", routes.tracking_link(&order.order_number));
}

/// The tracking view: order summary, totals and status timeline.
pub fn tracker_screen(state: &TrackerState) -> String {
    let mut out = header(&Route::Track {
        order: state.order_number.as_ref().map(|n| n.to_string()),
    });
    let number = state
        .order_number
        .as_ref()
        .map(|n| n.as_str())
        .unwrap_or("");
    let _ = writeln!(out, "\nTrack Order: {number}");

    if state.loading {
        let _ = writeln!(out, "Loading order...");
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {error}");
    }

    let Some(order) = &state.order else {
        return out;
    };

    let _ = writeln!(out, "\nOrder {}", order.order_number);
    let _ = writeln!(out, "  Status    {}", order.status.label());
    let _ = writeln!(
        out,
        "  Customer  {}",
        order.customer_name.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        out,
        "  Email     {}",
        order.customer_email.as_deref().unwrap_or("-")
    );
    totals_block(&mut out, &order.totals());

    let _ = writeln!(out, "\nTimeline");
    if state.events.is_empty() {
        let _ = writeln!(out, "  No events yet.");
    }
    for event in &state.events {
        let when = match event.recorded_at() {
            Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
            None => event.timestamp.clone().unwrap_or_default(),
        };
        let _ = writeln!(out, "  {when:<16}  {}", event.label());
    }
    out
}

pub fn auth_screen(page: &AuthPage) -> String {
    let mut out = header(&Route::Auth);
    match page.user() {
        Some(user) => {
            let _ = writeln!(out, "\nLogged in as {}", user.username);
        }
        None => {
            let _ = writeln!(out, "\nLogin");
        }
    }
    if let Some(message) = page.message() {
        let _ = writeln!(out, "{message}");
    }
    out
}

pub fn not_found_screen(path: &str) -> String {
    let route = Route::NotFound {
        path: path.to_string(),
    };
    format!(
        "{}\n404 – Page Not Found\nNothing lives at {path}.\n",
        header(&route)
    )
}
