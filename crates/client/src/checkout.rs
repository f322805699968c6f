//! Order placement.
//!
//! Checkout is a two-phase contract: `POST /orders` creates the order,
//! and for card/UPI payments a [`PaymentHandler`] collects a
//! [`PaymentProof`] from the third-party gateway which is then verified
//! against that order id. Cash on delivery settles without the handler.
//!
//! Everything that can be rejected locally is rejected before the first
//! network call.

use std::future::Future;

use tracing::{instrument, warn};
use uuid::Uuid;

use pomade_core::{Amount, NewOrder, NewOrderItem, Order, OrderId, OrderStatus, PaymentMethod, UserId};

use crate::api::orders::{OrderApi, PaymentProof};
use crate::cart::CartSynchronizer;
use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::token::TokenStore;

/// What the payment gateway needs to collect a payment.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// The order being paid for.
    pub order_id: OrderId,
    /// Amount to collect.
    pub amount: Amount,
    /// Card or UPI.
    pub method: PaymentMethod,
    /// Client-generated receipt id handed to the gateway.
    pub receipt: String,
}

/// Client-side bridge to the third-party payment gateway.
///
/// Implementations front whatever widget or device collects the payment;
/// the SDK only needs the resulting proof back.
pub trait PaymentHandler {
    /// Collect a payment for a created order.
    fn collect(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<PaymentProof, ApiError>> + Send;
}

/// Handler for environments with no payment gateway wired up. Collection
/// always fails; cash-on-delivery checkouts never reach it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPaymentGateway;

impl PaymentHandler for NoPaymentGateway {
    async fn collect(&self, _request: &PaymentRequest) -> Result<PaymentProof, ApiError> {
        Err(ApiError::validation(
            "no payment gateway configured; use cash on delivery",
        ))
    }
}

/// Shipping details collected at checkout. Validated locally; the backend
/// keeps its own copy on the order.
#[derive(Debug, Clone, Default)]
pub struct ShippingDetails {
    pub name: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub phone: Option<String>,
}

impl ShippingDetails {
    fn validate(&self) -> Result<(), ApiError> {
        for (field, value) in [
            ("name", &self.name),
            ("street", &self.street),
            ("city", &self.city),
            ("postal code", &self.postal_code),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::Validation(format!("shipping {field} is required")));
            }
        }
        Ok(())
    }
}

/// Everything the checkout view hands over when the buyer confirms.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub shipping: ShippingDetails,
    pub shipping_method: Option<String>,
    pub payment_method: PaymentMethod,
    /// Verified agent to credit with the sale, if one was tagged.
    pub agent_id: Option<UserId>,
    pub discount: Amount,
    pub tax: Amount,
    pub shipping_fee: Amount,
}

/// Order placement over the cart mirror and the order endpoints.
#[derive(Clone)]
pub struct Checkout {
    orders: OrderApi,
    cart: CartSynchronizer,
    tokens: TokenStore,
}

impl Checkout {
    /// Create a checkout service sharing the gateway's credential store.
    #[must_use]
    pub fn new(gateway: ApiGateway, cart: CartSynchronizer) -> Self {
        let tokens = gateway.tokens().clone();
        Self {
            orders: OrderApi::new(gateway),
            cart,
            tokens,
        }
    }

    /// Place an order from the current cart.
    ///
    /// Local checks come first: a credential must be present, the cart
    /// must be non-empty, and the shipping fields must be filled in. Then
    /// the order is created, card/UPI payments are collected and
    /// verified, and the cart is cleared.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for local rejections (no network call is
    /// made), any other [`ApiError`] from order creation or payment
    /// verification. A failed cart clear after a placed order is logged,
    /// not returned: the order already exists.
    #[instrument(skip_all, fields(method = ?form.payment_method))]
    pub async fn place_order(
        &self,
        form: &CheckoutForm,
        payment: &impl PaymentHandler,
    ) -> Result<Order, ApiError> {
        if self.tokens.get().is_none() {
            return Err(ApiError::validation("sign in to place an order"));
        }
        form.shipping.validate()?;

        let cart = self
            .cart
            .cart()
            .filter(|cart| !cart.items.is_empty())
            .ok_or_else(|| ApiError::validation("cart is empty, add items before checking out"))?;

        let subtotal = cart.total_price;
        let total = subtotal + form.tax + form.shipping_fee - form.discount;
        let new_order = NewOrder {
            items: cart
                .items
                .iter()
                .map(|item| NewOrderItem {
                    product_id: item.product_id.clone(),
                    name: item.product_name.clone(),
                    price: item.price,
                    quantity: item.quantity,
                })
                .collect(),
            subtotal,
            discount: form.discount,
            tax: form.tax,
            shipping: form.shipping_fee,
            total,
            payment_method: form.payment_method,
            shipping_method: form.shipping_method.clone(),
            agent_id: form.agent_id.clone(),
            status: OrderStatus::Pending,
        };

        let order = self.orders.create(&new_order).await?;

        let order = match form.payment_method {
            PaymentMethod::Cod => order,
            PaymentMethod::Card | PaymentMethod::Upi => {
                let request = PaymentRequest {
                    order_id: order.id.clone(),
                    amount: order.total,
                    method: form.payment_method,
                    receipt: Uuid::new_v4().to_string(),
                };
                let proof = payment.collect(&request).await?;
                self.orders.verify_payment(&order.id, &proof).await?
            }
        };

        if let Err(err) = self.cart.clear().await {
            warn!(error = %err, "failed to clear cart after order placement");
        }

        Ok(order)
    }
}
