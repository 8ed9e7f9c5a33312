//! # Ocean Eats CLI
//!
//! Renders one page of the storefront. `/track?order=<number>` keeps running
//! and prints every update until Ctrl-C.

use clap::Parser;
use ocean_eats::config::Config;
use ocean_eats::lifecycle::{setup_tracing, Storefront};
use ocean_eats::render;
use ocean_eats::routes::Route;
use tracing::{error, info, warn, Instrument};

#[derive(Parser, Debug)]
#[command(name = "ocean-eats", about = "Browse the Ocean Eats menu and track orders")]
struct Cli {
    /// Page to open, e.g. `/`, `/auth` or `/track?order=OE-42`.
    #[arg(default_value = "/")]
    route: String,

    /// Base URL of the menu API.
    #[arg(long)]
    api_url: Option<String>,

    /// Seconds between tracking polls.
    #[arg(long)]
    poll_interval_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenv::dotenv().ok();
    setup_tracing();
    let cli = Cli::parse();

    let config = Config::load()
        .and_then(|c| c.with_overrides(cli.api_url.as_deref(), cli.poll_interval_secs))
        .map_err(|e| e.to_string())?;
    info!(api_url = %config.api_url, route = %cli.route, "Starting");

    let storefront = Storefront::new(&config).map_err(|e| e.to_string())?;
    let route = storefront.routes.resolve(&cli.route);

    match route {
        Route::Menu => {
            let span = tracing::info_span!("menu");
            async {
                let mut page = storefront.menu_page();
                page.load().await;
                let cart = page.cart().await.map_err(|e| e.to_string())?;
                println!("{}", render::menu_screen(&page, &cart, &storefront.routes));
                Ok::<_, String>(())
            }
            .instrument(span)
            .await?;
        }
        Route::Auth => {
            let mut page = storefront.auth_page();
            page.load().await;
            println!("{}", render::auth_screen(&page));
        }
        Route::Track { order } => track(&storefront, order.as_deref()).await,
        Route::NotFound { path } => {
            warn!(%path, "No such page");
            println!("{}", render::not_found_screen(&path));
        }
    }

    storefront.shutdown().await
}

/// Prints the tracker on every change until Ctrl-C.
async fn track(storefront: &Storefront, order: Option<&str>) {
    let mut tracker = storefront.tracker(order);
    let mut updates = tracker.subscribe();
    println!("{}", render::tracker_screen(&tracker.state()));

    if order.is_some() {
        let span = tracing::info_span!("tracking");
        async {
            loop {
                tokio::select! {
                    changed = updates.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let state = updates.borrow_and_update().clone();
                        println!("{}", render::tracker_screen(&state));
                    }
                    signal = tokio::signal::ctrl_c() => {
                        if let Err(e) = signal {
                            error!(error = %e, "Could not listen for Ctrl-C");
                        }
                        break;
                    }
                }
            }
        }
        .instrument(span)
        .await;
    }

    tracker.teardown().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_are_optional_and_route_defaults_to_menu() {
        let cli = Cli::try_parse_from(["ocean-eats"]).unwrap();
        assert_eq!(cli.route, "/");
        assert_eq!(cli.api_url, None);
        assert_eq!(cli.poll_interval_secs, None);
    }

    #[test]
    fn zero_poll_interval_flag_is_rejected() {
        let cli =
            Cli::try_parse_from(["ocean-eats", "/track?order=OE-1", "--poll-interval-secs", "0"])
                .unwrap();
        let base = Config::from_lookup(|_| None).unwrap();
        assert!(base
            .with_overrides(cli.api_url.as_deref(), cli.poll_interval_secs)
            .is_err());
    }
}
