//! Pomade CLI - Terminal storefront client for the marketplace.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and persist the session token
//! pomade login -e buyer@salon.example
//!
//! # Browse the catalog
//! pomade products list --category "hair care"
//! pomade products show product-7
//!
//! # Work the cart
//! pomade cart add product-7 --quantity 2
//! pomade cart show
//!
//! # Place a cash-on-delivery order
//! pomade checkout --name "Dana" --street "12 Rue des Salons" \
//!     --city Lyon --postal-code 69002
//!
//! # Check what a guarded view would do
//! pomade open /admin/dashboard
//! ```
//!
//! # Environment
//!
//! - `POMADE_API_BASE_URL` - backend base URL
//! - `POMADE_TOKEN_FILE` - where the session token is persisted
//!   (default: `.pomade-token`)
//! - `POMADE_LOG` - log filter (e.g. `pomade_client=debug`)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pomade_client::api::{AuthApi, CommissionApi, OrderApi, ProductApi, UserApi};
use pomade_client::cart::CartSynchronizer;
use pomade_client::checkout::Checkout;
use pomade_client::config::ClientConfig;
use pomade_client::gateway::ApiGateway;
use pomade_client::session::SessionManager;
use pomade_client::token::TokenStore;

mod commands;
mod token_file;

use commands::{agents, auth, cart, catalog, open, orders, purchase};
use token_file::TokenFile;

#[derive(Parser)]
#[command(name = "pomade")]
#[command(author, version, about = "Pomade marketplace terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session token
    Login(auth::LoginArgs),
    /// Drop the session token
    Logout,
    /// Show the current session
    Whoami,
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: catalog::ProductsAction,
    },
    /// Inspect and mutate the cart
    Cart {
        #[command(subcommand)]
        action: cart::CartAction,
    },
    /// List and inspect orders
    Orders {
        #[command(subcommand)]
        action: orders::OrdersAction,
    },
    /// Place an order from the current cart
    Checkout(purchase::CheckoutArgs),
    /// List active agents for checkout attribution
    Agents,
    /// List the signed-in agent's commissions
    Commissions,
    /// Resolve a view path through the route guard
    Open(open::OpenArgs),
}

/// Everything a command needs, wired over one shared token store.
pub struct App {
    pub session: SessionManager,
    pub cart: CartSynchronizer,
    pub auth: AuthApi,
    pub products: ProductApi,
    pub orders: OrderApi,
    pub users: UserApi,
    pub commissions: CommissionApi,
    pub checkout: Checkout,
    pub tokens: TokenStore,
}

impl App {
    fn wire(config: &ClientConfig, tokens: TokenStore) -> Self {
        let gateway = ApiGateway::new(config, tokens.clone());
        let cart = CartSynchronizer::new(gateway.clone());
        Self {
            session: SessionManager::new(gateway.clone(), tokens.clone()),
            cart: cart.clone(),
            auth: AuthApi::new(gateway.clone()),
            products: ProductApi::new(gateway.clone()),
            orders: OrderApi::new(gateway.clone()),
            users: UserApi::new(gateway.clone()),
            commissions: CommissionApi::new(gateway.clone()),
            checkout: Checkout::new(gateway, cart),
            tokens,
        }
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("POMADE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let token_file = TokenFile::from_env();
    let tokens = token_file
        .load()
        .map_or_else(TokenStore::new, TokenStore::with_credential);
    let app = App::wire(&config, tokens);

    let result = match cli.command {
        Commands::Login(args) => auth::login(&app, args).await,
        Commands::Logout => auth::logout(&app),
        Commands::Whoami => auth::whoami(&app).await,
        Commands::Products { action } => catalog::run(&app, action).await,
        Commands::Cart { action } => cart::run(&app, action).await,
        Commands::Orders { action } => orders::run(&app, action).await,
        Commands::Checkout(args) => purchase::run(&app, args).await,
        Commands::Agents => agents::agents(&app).await,
        Commands::Commissions => agents::commissions(&app).await,
        Commands::Open(args) => open::run(&app, args).await,
    };

    // The token file is the process-to-process equivalent of browser
    // storage: whatever the store holds after the command is what the
    // next invocation starts from.
    if let Err(err) = token_file.sync(&app.tokens) {
        eprintln!("warning: failed to persist session token: {err}");
    }

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}
