//! Catalog browsing commands.

use clap::Subcommand;

use pomade_client::api::products::ProductFilters;
use pomade_core::ProductId;

use super::CommandResult;
use crate::App;

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List catalog products
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Full-text search
        #[arg(long)]
        search: Option<String>,

        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show a single product
    Show {
        /// Product id or numeric catalog id
        id: String,
    },
}

pub async fn run(app: &App, action: ProductsAction) -> CommandResult {
    match action {
        ProductsAction::List {
            category,
            search,
            page,
            limit,
        } => {
            let filters = ProductFilters {
                category,
                search,
                page,
                limit,
            };
            let listing = app.products.list(&filters).await?;
            for product in &listing.products {
                println!(
                    "{:<24} {:>10}  {}",
                    product.id,
                    product.price.to_string(),
                    product.name
                );
            }
            println!("{} of {} products", listing.products.len(), listing.total);
        }
        ProductsAction::Show { id } => {
            let product = app.products.get(&ProductId::new(id)).await?;
            println!("{} ({})", product.name, product.id);
            println!("price: {}", product.price);
            if let Some(category) = &product.category {
                println!("category: {category}");
            }
            if let Some(brand) = &product.brand {
                println!("brand: {brand}");
            }
            if let Some(stock) = product.stock {
                println!("stock: {stock}");
            }
            if let Some(description) = &product.description {
                println!("\n{description}");
            }
        }
    }
    Ok(())
}
