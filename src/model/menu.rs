/// Menu data served by `GET /api/menu-items` and `GET /api/categories`.
///
/// Both are read-only on the client; a fresh copy replaces the old one on
/// every fetch.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for menu items.
///
/// Cart lines are keyed by it, so it doubles as the cart actor's entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: u64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_available: bool,
    #[serde(default)]
    pub category_id: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_item_tolerates_missing_optional_fields() {
        let item: MenuItem = serde_json::from_str(
            r#"{"id": 3, "name": "Poke Bowl", "price_cents": 1450, "is_available": true}"#,
        )
        .unwrap();
        assert_eq!(item.id, MenuItemId(3));
        assert_eq!(item.description, None);
        assert_eq!(item.category_id, None);
    }

    #[test]
    fn id_serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&MenuItemId(12)).unwrap(), "12");
        assert_eq!(MenuItemId(12).to_string(), "item_12");
    }
}
