//! Order listing commands.

use clap::Subcommand;

use pomade_client::api::orders::OrderFilters;
use pomade_core::{Order, OrderId};

use super::{CommandResult, require_session};
use crate::App;

#[derive(Subcommand)]
pub enum OrdersAction {
    /// List the current account's orders
    Mine {
        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },
    /// List orders assigned to the current agent
    Assigned,
    /// List all orders (admin)
    List,
    /// Show a single order
    Show { id: String },
}

pub async fn run(app: &App, action: OrdersAction) -> CommandResult {
    require_session(app, "/my-orders").await?;

    match action {
        OrdersAction::Mine { page, limit } => {
            let filters = OrderFilters {
                page,
                limit,
                ..Default::default()
            };
            let listing = app.orders.my_orders(&filters).await?;
            print_orders(&listing.orders);
        }
        OrdersAction::Assigned => {
            let listing = app.orders.assigned(&OrderFilters::default()).await?;
            print_orders(&listing.orders);
        }
        OrdersAction::List => {
            let listing = app.orders.list(&OrderFilters::default()).await?;
            print_orders(&listing.orders);
        }
        OrdersAction::Show { id } => {
            let order = app.orders.get(&OrderId::new(id)).await?;
            println!("order {} [{:?}]", order.id, order.status);
            for item in &order.items {
                println!("  {:<24} x{:<3} {}", item.product_id, item.quantity, item.price);
            }
            println!("total: {}", order.total);
            if let Some(agent) = &order.agent_id {
                println!("agent: {agent}");
            }
        }
    }
    Ok(())
}

fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("no orders");
        return;
    }
    for order in orders {
        println!(
            "{:<28} {:>10}  {:?}  {} items",
            order.id,
            order.total.to_string(),
            order.status,
            order.items.len()
        );
    }
}
