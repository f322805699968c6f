//! Checkout command.

use clap::Args;

use pomade_client::checkout::{CheckoutForm, NoPaymentGateway, ShippingDetails};
use pomade_core::{Amount, PaymentMethod, UserId};

use super::{CommandResult, require_session};
use crate::App;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient name
    #[arg(long)]
    pub name: String,

    /// Street address
    #[arg(long)]
    pub street: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// Postal code
    #[arg(long)]
    pub postal_code: String,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Payment method (card and UPI need a payment gateway; the terminal
    /// client only supports cash on delivery)
    #[arg(long, value_enum, default_value_t = MethodArg::Cod)]
    pub method: MethodArg,

    /// Agent id to credit with the sale
    #[arg(long)]
    pub agent: Option<String>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum MethodArg {
    Card,
    Upi,
    Cod,
}

impl std::fmt::Display for MethodArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Upi => write!(f, "upi"),
            Self::Cod => write!(f, "cod"),
        }
    }
}

impl From<MethodArg> for PaymentMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Card => Self::Card,
            MethodArg::Upi => Self::Upi,
            MethodArg::Cod => Self::Cod,
        }
    }
}

pub async fn run(app: &App, args: CheckoutArgs) -> CommandResult {
    require_session(app, "/checkout").await?;

    // The order is built from the mirror; make sure it is current.
    app.cart.refresh().await?;

    let form = CheckoutForm {
        shipping: ShippingDetails {
            name: args.name,
            street: args.street,
            city: args.city,
            postal_code: args.postal_code,
            phone: args.phone,
        },
        shipping_method: None,
        payment_method: args.method.into(),
        agent_id: args.agent.map(UserId::new),
        discount: Amount::ZERO,
        tax: Amount::ZERO,
        shipping_fee: Amount::ZERO,
    };

    let order = app.checkout.place_order(&form, &NoPaymentGateway).await?;
    println!(
        "order {} placed, total {} ({} items)",
        order.id,
        order.total,
        order.items.len()
    );
    Ok(())
}
