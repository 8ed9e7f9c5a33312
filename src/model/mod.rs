//! Plain data: menu and order DTOs exchanged with the API, and the cart line
//! managed by the cart actor.

pub mod cart;
pub mod menu;
pub mod order;
pub mod user;

pub use cart::*;
pub use menu::*;
pub use order::*;
pub use user::*;
