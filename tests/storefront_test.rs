use ocean_eats::api::mock::MockMenuApi;
use ocean_eats::lifecycle::Storefront;
use ocean_eats::model::{Category, MenuItem, MenuItemId, Order, OrderNumber, OrderStatus};
use ocean_eats::pages::CategoryTab;
use ocean_eats::render;
use ocean_eats::routes::Route;
use std::sync::Arc;
use std::time::Duration;

fn menu() -> Vec<MenuItem> {
    let item = |id: u32, name: &str, price_cents: u64, category: u32, available: bool| MenuItem {
        id: MenuItemId(id),
        name: name.to_string(),
        description: Some(format!("House {name}")),
        price_cents,
        image_url: None,
        is_available: available,
        category_id: Some(category),
    };
    vec![
        item(1, "Gyoza", 500, 1, true),
        item(2, "Seaweed Salad", 300, 1, true),
        item(3, "Salmon Nigiri", 650, 2, true),
        item(4, "Uni", 2200, 2, false),
    ]
}

fn placed(number: &str) -> Order {
    Order {
        order_number: OrderNumber::new(number).unwrap(),
        status: OrderStatus::Pending,
        customer_name: Some("Mara".into()),
        customer_email: Some("mara@example.com".into()),
        subtotal_cents: Some(1300),
        tax_cents: Some(104),
        delivery_fee_cents: Some(0),
        total_cents: Some(1404),
    }
}

fn storefront(api: &Arc<MockMenuApi>) -> Storefront {
    Storefront::with_api(api.clone(), Duration::from_secs(6)).unwrap()
}

#[tokio::test]
async fn test_browse_add_and_place_order() {
    let api = Arc::new(MockMenuApi::new());
    api.categories.push_ok(vec![
        Category { id: 1, name: "Starters".into() },
        Category { id: 2, name: "Sushi".into() },
    ]);
    api.menu_items.set_ok(menu());
    api.place_order.push_ok(placed("OE 7/B"));

    let storefront = storefront(&api);
    let mut page = storefront.menu_page();
    page.load().await;

    let labels: Vec<String> = page.tabs().into_iter().map(|(_, label)| label).collect();
    assert_eq!(labels, ["All", "Starters", "Sushi"]);
    assert_eq!(page.items().len(), 4);

    page.select_category(CategoryTab::Category(1)).await;
    assert_eq!(page.items().len(), 2);
    assert_eq!(api.menu_filters(), [None, Some(1)]);

    page.add_to_cart(MenuItemId(1)).await.unwrap();
    page.add_to_cart(MenuItemId(1)).await.unwrap();
    page.add_to_cart(MenuItemId(2)).await.unwrap();

    let cart = page.cart().await.unwrap();
    assert_eq!(cart.totals.total_cents, 1404);
    assert!(!cart.can_place);

    page.form.name = "Mara".into();
    page.form.email = "mara@example.com".into();
    page.form.special_instructions = "Extra ginger".into();
    assert!(page.cart().await.unwrap().can_place);

    assert!(page.place_order().await.unwrap());
    assert_eq!(
        page.placed().map(|o| o.order_number.as_str()),
        Some("OE 7/B")
    );
    assert!(page.form.special_instructions.is_empty());
    assert_eq!(page.form.name, "Mara");

    let cart = page.cart().await.unwrap();
    assert!(cart.lines.is_empty());

    let screen = render::menu_screen(&page, &cart, &storefront.routes);
    let link = storefront
        .routes
        .tracking_link(&OrderNumber::new("OE 7/B").unwrap());
    assert!(screen.contains(&link));
    assert_eq!(
        storefront.routes.resolve(&link),
        Route::Track {
            order: Some("OE 7/B".into())
        }
    );

    drop(page);
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_loads_leave_page_empty() {
    let api = Arc::new(MockMenuApi::new());
    api.categories.push_err(500, "down");
    api.menu_items.push_err(500, "down");

    let storefront = storefront(&api);
    let mut page = storefront.menu_page();
    page.load().await;

    assert_eq!(page.tabs(), [(CategoryTab::All, "All".to_string())]);
    assert!(page.items().is_empty());
    assert_eq!(page.error(), None);

    drop(page);
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_disabled_place_order_makes_no_call() {
    let api = Arc::new(MockMenuApi::new());
    api.categories.push_ok(vec![]);
    api.menu_items.set_ok(menu());

    let storefront = storefront(&api);
    let mut page = storefront.menu_page();
    page.load().await;

    page.form.name = "Mara".into();
    page.form.email = "mara@example.com".into();
    assert!(!page.place_order().await.unwrap());
    assert_eq!(api.place_order.calls(), 0);

    let err = page.add_to_cart(MenuItemId(4)).await.unwrap_err();
    assert_eq!(err.to_string(), "Uni is currently unavailable");
    assert!(page.cart().await.unwrap().lines.is_empty());

    drop(page);
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_order_shows_message_and_keeps_cart() {
    let api = Arc::new(MockMenuApi::new());
    api.categories.push_ok(vec![]);
    api.menu_items.set_ok(menu());
    api.place_order.push_err(400, "Item 3 sold out");

    let storefront = storefront(&api);
    let mut page = storefront.menu_page();
    page.load().await;
    page.add_to_cart(MenuItemId(3)).await.unwrap();
    page.form.name = "Mara".into();
    page.form.email = "mara@example.com".into();
    page.form.special_instructions = "Extra ginger".into();

    assert!(!page.place_order().await.unwrap());
    assert_eq!(page.error(), Some("Item 3 sold out"));
    assert!(page.placed().is_none());
    assert_eq!(page.form.special_instructions, "Extra ginger");
    assert_eq!(page.cart().await.unwrap().lines.len(), 1);

    drop(page);
    storefront.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_tracker_from_route() {
    let api = Arc::new(MockMenuApi::new());
    api.order.set_ok(placed("OE-42"));
    api.order_events.set_ok(vec![]);

    let storefront = storefront(&api);
    let Route::Track { order } = storefront.routes.resolve("/track?order=OE-42") else {
        panic!("expected the tracking route");
    };

    let mut tracker = storefront.tracker(order.as_deref());
    let mut updates = tracker.subscribe();
    while tracker.state().order.is_none() {
        updates.changed().await.unwrap();
    }

    let screen = render::tracker_screen(&tracker.state());
    assert!(screen.contains("Order OE-42"));
    assert!(screen.contains("Status    Pending"));
    assert!(screen.contains("No events yet."));

    tracker.teardown().await;
    drop(tracker);
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_auth_page_uses_shared_session() {
    let api = Arc::new(MockMenuApi::new());
    api.current_user.push_ok(None).push_ok(Some(ocean_eats::model::CurrentUser {
        username: "mara".into(),
    }));
    api.login.push_ok(());

    let storefront = storefront(&api);
    let mut page = storefront.auth_page();
    page.load().await;
    page.username = "mara".into();
    page.password = "hunter2".into();
    page.login().await;

    assert!(render::auth_screen(&page).contains("Logged in as mara"));
    assert_eq!(
        storefront.session.current().await.map(|u| u.username),
        Some("mara".to_string())
    );

    drop(page);
    storefront.shutdown().await.unwrap();
}
