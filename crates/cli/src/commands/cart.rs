//! Cart commands.
//!
//! Mutations require a signed-in session; the credential check is the
//! caller's job, so each command resolves the session through the guard
//! before touching the synchronizer.

use clap::Subcommand;

use pomade_core::{Cart, ProductId};

use super::{CommandResult, require_session};
use crate::App;

#[derive(Subcommand)]
pub enum CartAction {
    /// Fetch and display the cart
    Show,
    /// Add a product
    Add {
        /// Product id or numeric catalog id
        id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity
    Update {
        /// Product id or numeric catalog id
        id: String,

        /// New quantity (at least 1)
        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product id or numeric catalog id
        id: String,
    },
    /// Empty the cart
    Clear,
}

pub async fn run(app: &App, action: CartAction) -> CommandResult {
    require_session(app, "/cart").await?;

    let cart = match action {
        CartAction::Show => app.cart.refresh().await?,
        CartAction::Add { id, quantity } => app.cart.add_item(ProductId::new(id), quantity).await?,
        CartAction::Update { id, quantity } => {
            app.cart.update_item(ProductId::new(id), quantity).await?
        }
        CartAction::Remove { id } => app.cart.remove_item(ProductId::new(id)).await?,
        CartAction::Clear => app.cart.clear().await?,
    };

    print_cart(&cart);
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.items.is_empty() {
        println!("cart is empty");
        return;
    }
    for item in &cart.items {
        println!(
            "{:<24} x{:<3} {:>10}  {}",
            item.product_id,
            item.quantity,
            item.price.to_string(),
            item.product_name
        );
    }
    println!("{} items, total {}", cart.total_items, cart.total_price);
}
