use crate::api::{HttpMenuApi, MenuApi};
use crate::checkout::Checkout;
use crate::clients::CartClient;
use crate::config::Config;
use crate::pages::{AuthPage, MenuPage};
use crate::routes::{RouteError, Routes};
use crate::session::Session;
use crate::tracker::OrderTracker;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("http client: {0}")]
    Http(#[from] crate::api::ApiError),

    #[error(transparent)]
    Routes(#[from] RouteError),
}

/// Everything a running storefront needs, wired together.
///
/// - **cart**: client of the cart actor, spawned by [`Storefront::with_api`]
/// - **session**: who is logged in, shared by every auth page
/// - **checkout**: places orders from the cart
/// - **routes**: resolves paths and builds tracking links
pub struct Storefront {
    pub api: Arc<dyn MenuApi>,
    pub cart: CartClient,
    pub session: Session,
    pub checkout: Checkout,
    pub routes: Routes,
    poll_interval: Duration,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// Talks to the API at `config.api_url`.
    pub fn new(config: &Config) -> Result<Self, StartupError> {
        let api = HttpMenuApi::from_config(config)?;
        Self::with_api(Arc::new(api), config.poll_interval)
    }

    /// Starts the cart actor and wires it to `api`.
    pub fn with_api(api: Arc<dyn MenuApi>, poll_interval: Duration) -> Result<Self, StartupError> {
        let routes = Routes::new()?;

        let (cart_actor, cart) = crate::cart_actor::new();
        let cart_handle = tokio::spawn(cart_actor.run(()));

        info!(poll_interval = ?poll_interval, "Storefront started");
        Ok(Self {
            session: Session::new(api.clone()),
            checkout: Checkout::new(api.clone(), cart.clone()),
            api,
            cart,
            routes,
            poll_interval,
            handles: vec![cart_handle],
        })
    }

    pub fn menu_page(&self) -> MenuPage {
        MenuPage::new(self.api.clone(), self.cart.clone())
    }

    pub fn auth_page(&self) -> AuthPage {
        AuthPage::new(self.session.clone())
    }

    /// A tracker for `initial`, already polling if it is non-empty.
    pub fn tracker(&self, initial: Option<&str>) -> OrderTracker {
        let mut tracker = OrderTracker::new(self.api.clone(), self.poll_interval);
        if let Some(number) = initial {
            tracker.set_order_number(number);
        }
        tracker
    }

    /// Drops the client handles and waits for the cart actor to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        drop(self.checkout);
        drop(self.cart);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
