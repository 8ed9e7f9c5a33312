//! Client-side routes.
//!
//! | Path | Page |
//! |---|---|
//! | `/` | menu, category tabs and cart |
//! | `/track?order=<number>` | order tracking |
//! | `/auth` | login / logout |
//! | anything else | not found |
//!
//! A trailing slash is ignored.

use crate::model::OrderNumber;
use matchit::Router;
use reqwest::Url;

pub mod paths {
    pub const MENU: &str = "/";
    pub const TRACK: &str = "/track";
    pub const AUTH: &str = "/auth";

    /// Query parameter carrying the order number on [`TRACK`].
    pub const ORDER: &str = "order";
}

/// Header navigation, in display order.
pub const NAV: [(&str, &str); 2] = [("Menu", paths::MENU), ("Track Order", paths::TRACK)];

/// Targets are resolved against this origin; only path and query matter.
const ORIGIN: &str = "http://ocean-eats.local/";

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("route table: {0}")]
    Insert(#[from] matchit::InsertError),

    #[error("origin: {0}")]
    Origin(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Menu,
    Track { order: Option<String> },
    Auth,
    NotFound { path: String },
}

impl Route {
    /// The path this route was resolved from, without its query.
    pub fn path(&self) -> &str {
        match self {
            Route::Menu => paths::MENU,
            Route::Track { .. } => paths::TRACK,
            Route::Auth => paths::AUTH,
            Route::NotFound { path } => path,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Page {
    Menu,
    Track,
    Auth,
}

pub struct Routes {
    router: Router<Page>,
    origin: Url,
}

impl Routes {
    pub fn new() -> Result<Self, RouteError> {
        let mut router = Router::new();
        router.insert(paths::MENU, Page::Menu)?;
        router.insert(paths::TRACK, Page::Track)?;
        router.insert(paths::AUTH, Page::Auth)?;
        let origin = Url::parse(ORIGIN).map_err(|e| RouteError::Origin(e.to_string()))?;
        Ok(Self { router, origin })
    }

    /// Maps a path with optional query (`/track?order=OE-7`) to a page.
    pub fn resolve(&self, target: &str) -> Route {
        let Ok(url) = self.origin.join(target) else {
            return Route::NotFound {
                path: target.to_string(),
            };
        };

        let path = match url.path() {
            "/" => "/",
            other => other.trim_end_matches('/'),
        };

        match self.router.at(path).map(|matched| *matched.value) {
            Ok(Page::Menu) => Route::Menu,
            Ok(Page::Auth) => Route::Auth,
            Ok(Page::Track) => Route::Track {
                order: url
                    .query_pairs()
                    .find(|(key, _)| key == paths::ORDER)
                    .map(|(_, value)| value.into_owned())
                    .filter(|value| !value.is_empty()),
            },
            Err(_) => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    /// `/track?order=<number>`, with the number query-encoded.
    pub fn tracking_link(&self, number: &OrderNumber) -> String {
        let mut url = self.origin.clone();
        url.set_path(paths::TRACK);
        url.query_pairs_mut()
            .append_pair(paths::ORDER, number.as_str());
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }
}
