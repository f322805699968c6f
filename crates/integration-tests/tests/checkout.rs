//! Two-phase checkout against a mock backend.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use pomade_client::api::orders::PaymentProof;
use pomade_client::checkout::{
    Checkout, CheckoutForm, NoPaymentGateway, PaymentHandler, PaymentRequest, ShippingDetails,
};
use pomade_client::error::ApiError;
use pomade_core::{Amount, OrderStatus, PaymentMethod, UserId};

use pomade_integration_tests::{TestContext, cart_json, order_json};

fn form(payment_method: PaymentMethod) -> CheckoutForm {
    CheckoutForm {
        shipping: ShippingDetails {
            name: "Dana".to_string(),
            street: "12 Rue des Salons".to_string(),
            city: "Lyon".to_string(),
            postal_code: "69002".to_string(),
            phone: None,
        },
        shipping_method: Some("standard".to_string()),
        payment_method,
        agent_id: Some(UserId::new("agent-3")),
        discount: Amount::ZERO,
        tax: Amount::ZERO,
        shipping_fee: Amount::ZERO,
    }
}

async fn seed_cart(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(cart_json(&[("product-7", "Argan Oil 1L", 129.5, 2)])),
        )
        .mount(&ctx.server)
        .await;
    ctx.cart.refresh().await.unwrap();
}

struct FakeGateway;

impl PaymentHandler for FakeGateway {
    async fn collect(&self, request: &PaymentRequest) -> Result<PaymentProof, ApiError> {
        assert!(!request.receipt.is_empty());
        Ok(PaymentProof {
            payment_id: "pay_123".to_string(),
            signature: format!("sig-{}", request.order_id),
        })
    }
}

#[tokio::test]
async fn cod_checkout_creates_the_order_and_clears_the_cart() {
    let ctx = TestContext::signed_in("tok").await;
    seed_cart(&ctx).await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_partial_json(json!({
            "paymentMethod": "cod",
            "status": "PENDING",
            "agentId": "agent-3",
            "items": [{"productId": "product-7", "quantity": 2}],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(order_json(
            "o-1", "PENDING", "cod", 259.0,
        )))
        .expect(1)
        .mount(&ctx.server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(&[])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let checkout = Checkout::new(ctx.gateway.clone(), ctx.cart.clone());
    let order = checkout
        .place_order(&form(PaymentMethod::Cod), &NoPaymentGateway)
        .await
        .unwrap();

    assert_eq!(order.id.as_str(), "o-1");
    assert_eq!(ctx.cart.totals().total_items, 0);
}

#[tokio::test]
async fn card_checkout_verifies_the_collected_payment() {
    let ctx = TestContext::signed_in("tok").await;
    seed_cart(&ctx).await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(order_json(
            "o-9", "PENDING", "card", 259.0,
        )))
        .expect(1)
        .mount(&ctx.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/orders/o-9/verify-payment"))
        .and(body_json(json!({
            "paymentId": "pay_123",
            "signature": "sig-o-9",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(
            "o-9",
            "CONFIRMED",
            "card",
            259.0,
        )))
        .expect(1)
        .mount(&ctx.server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(&[])))
        .mount(&ctx.server)
        .await;

    let checkout = Checkout::new(ctx.gateway.clone(), ctx.cart.clone());
    let order = checkout
        .place_order(&form(PaymentMethod::Card), &FakeGateway)
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn missing_shipping_fields_are_rejected_before_any_order_call() {
    let ctx = TestContext::signed_in("tok").await;
    seed_cart(&ctx).await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let mut bad_form = form(PaymentMethod::Cod);
    bad_form.shipping.postal_code = String::new();

    let checkout = Checkout::new(ctx.gateway.clone(), ctx.cart.clone());
    let err = checkout
        .place_order(&bad_form, &NoPaymentGateway)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn empty_cart_is_rejected_locally() {
    let ctx = TestContext::signed_in("tok").await;

    let checkout = Checkout::new(ctx.gateway.clone(), ctx.cart.clone());
    let err = checkout
        .place_order(&form(PaymentMethod::Cod), &NoPaymentGateway)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(ctx.received_requests().await.is_empty());
}

#[tokio::test]
async fn anonymous_checkout_is_rejected_locally() {
    let ctx = TestContext::new().await;

    let checkout = Checkout::new(ctx.gateway.clone(), ctx.cart.clone());
    let err = checkout
        .place_order(&form(PaymentMethod::Cod), &NoPaymentGateway)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(ctx.received_requests().await.is_empty());
}
