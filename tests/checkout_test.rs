use ocean_eats::api::mock::MockMenuApi;
use ocean_eats::cart_actor;
use ocean_eats::checkout::{Checkout, CheckoutError, CheckoutForm};
use ocean_eats::clients::CartClient;
use ocean_eats::model::{MenuItem, MenuItemId, Order, OrderNumber, OrderStatus};
use std::sync::Arc;

fn item(id: u32, price_cents: u64) -> MenuItem {
    MenuItem {
        id: MenuItemId(id),
        name: format!("Item {id}"),
        description: None,
        price_cents,
        image_url: None,
        is_available: true,
        category_id: None,
    }
}

fn placed(number: &str) -> Order {
    Order {
        order_number: OrderNumber::new(number).unwrap(),
        status: OrderStatus::Pending,
        customer_name: Some("Mara".into()),
        customer_email: Some("mara@example.com".into()),
        subtotal_cents: None,
        tax_cents: None,
        delivery_fee_cents: None,
        total_cents: None,
    }
}

fn form() -> CheckoutForm {
    CheckoutForm {
        name: "Mara".into(),
        email: "mara@example.com".into(),
        special_instructions: String::new(),
    }
}

fn setup() -> (Arc<MockMenuApi>, CartClient, Checkout) {
    let api = Arc::new(MockMenuApi::new());
    let (actor, cart) = cart_actor::new();
    tokio::spawn(actor.run(()));
    let checkout = Checkout::new(api.clone(), cart.clone());
    (api, cart, checkout)
}

#[tokio::test]
async fn test_empty_cart_sends_nothing() {
    let (api, _cart, checkout) = setup();

    let err = checkout.place_order(&form()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
    assert_eq!(api.place_order.calls(), 0);
}

#[tokio::test]
async fn test_missing_customer_sends_nothing() {
    let (api, cart, checkout) = setup();
    cart.add_item(item(1, 500)).await.unwrap();

    let mut incomplete = form();
    incomplete.email.clear();
    let err = checkout.place_order(&incomplete).await.unwrap_err();
    assert!(matches!(err, CheckoutError::MissingCustomer));
    assert_eq!(api.place_order.calls(), 0);
    assert_eq!(cart.lines().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_success_sends_lines_and_clears_cart() {
    let (api, cart, checkout) = setup();
    api.place_order.push_ok(placed("OE-100"));

    let first = item(1, 500);
    cart.add_item(first.clone()).await.unwrap();
    cart.add_item(first).await.unwrap();
    cart.add_item(item(2, 300)).await.unwrap();

    let mut with_note = form();
    with_note.special_instructions = "No wasabi".into();
    let order = checkout.place_order(&with_note).await.unwrap();
    assert_eq!(order.order_number.as_str(), "OE-100");

    let sent = api.placed_orders();
    assert_eq!(sent.len(), 1);
    let request = &sent[0];
    assert_eq!(request.customer.name, "Mara");
    assert_eq!(request.delivery_fee_cents, 0);
    assert_eq!(request.special_instructions.as_deref(), Some("No wasabi"));
    let items: Vec<(u32, u32)> = request
        .items
        .iter()
        .map(|i| (i.menu_item_id.0, i.quantity))
        .collect();
    assert_eq!(items, [(1, 2), (2, 1)]);

    assert!(cart.lines().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_instructions_are_left_out() {
    let (api, cart, checkout) = setup();
    api.place_order.push_ok(placed("OE-101"));
    cart.add_item(item(1, 500)).await.unwrap();

    checkout.place_order(&form()).await.unwrap();
    assert_eq!(api.placed_orders()[0].special_instructions, None);
}

#[tokio::test]
async fn test_rejected_order_keeps_cart() {
    let (api, cart, checkout) = setup();
    api.place_order.push_err(422, "Kitchen is closed");
    cart.add_item(item(1, 500)).await.unwrap();

    let err = checkout.place_order(&form()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Rejected(_)));
    assert_eq!(err.user_message(), "Kitchen is closed");
    assert_eq!(cart.lines().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejection_without_body_uses_fallback() {
    let (api, cart, checkout) = setup();
    api.place_order.push_err(500, "  ");
    cart.add_item(item(1, 500)).await.unwrap();

    let err = checkout.place_order(&form()).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to place order.");
}
