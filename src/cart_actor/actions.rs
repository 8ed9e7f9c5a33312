//! Custom actions for the cart actor.
//!
//! The stepper buttons next to a cart line. Setting an exact quantity goes
//! through the regular update path ([`CartLineUpdate`](crate::model::CartLineUpdate)).

/// Custom actions for cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// One more of the item.
    Increase,
    /// One fewer, never going below 1.
    Decrease,
}

/// The line's quantity after the action.
pub type CartActionResult = u32;
