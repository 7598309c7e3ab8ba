//! Storekeep CLI - terminal admin dashboard for the DummyJSON demo store.
//!
//! # Usage
//!
//! ```bash
//! # Sign in with DummyJSON demo credentials
//! storekeep login -u emilys -p emilyspass
//!
//! # Browse the catalog
//! storekeep products list --search phone
//! storekeep products list --category furniture --all
//! storekeep products show 1
//!
//! # Manage the local cart
//! storekeep cart add 1 --qty 2
//! storekeep cart show
//! storekeep cart checkout
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - session management
//! - `products` - list, show, add, update
//! - `categories` - category index
//! - `cart` - show, add, remove, set, clear, checkout
//! - `health` - gateway liveness

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use storekeep_core::ProductId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "storekeep")]
#[command(author, version, about = "Terminal admin dashboard for the Storekeep demo store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in against the demo API and persist the session
    Login {
        /// Username (try `emilys`)
        #[arg(short, long)]
        username: String,

        /// Password (try `emilyspass`)
        #[arg(short, long)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// List product categories
    Categories,
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Check that the gateway answers
    Health,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List one page of products, or the whole catalog with --all
    List {
        /// Free-text search (takes precedence over --category)
        #[arg(long)]
        search: Option<String>,

        /// Category slug (see `storekeep categories`)
        #[arg(long)]
        category: Option<String>,

        /// Keep only products priced at least this much (per page)
        #[arg(long)]
        min_price: Option<f64>,

        /// Keep only products priced at most this much (per page)
        #[arg(long)]
        max_price: Option<f64>,

        /// Keep fetching pages until the catalog is exhausted
        #[arg(long)]
        all: bool,
    },
    /// Show a single product
    Show {
        /// Product id
        id: ProductId,
    },
    /// Create a product (DummyJSON simulates the write)
    Add {
        /// Title, at least 3 characters
        #[arg(long)]
        title: String,

        /// Description, at least 10 characters
        #[arg(long)]
        description: String,

        /// Price, strictly positive
        #[arg(long)]
        price: f64,

        /// Category slug
        #[arg(long)]
        category: Option<String>,
    },
    /// Update a product (absent fields stay untouched)
    Update {
        /// Product id
        id: ProductId,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New price
        #[arg(long)]
        price: Option<f64>,

        /// New category slug
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart contents and total
    Show,
    /// Fetch a product and add it to the cart
    Add {
        /// Product id
        id: ProductId,

        /// Quantity to add
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a line from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Overwrite a line's quantity (zero removes the line)
    Set {
        /// Product id
        id: ProductId,

        /// New quantity
        qty: u32,
    },
    /// Empty the cart
    Clear,
    /// Simulated checkout: requires a non-empty cart, then clears it
    Checkout,
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storekeep=info,storekeep_client=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&username, &password).await?;
        }
        Commands::Logout => commands::auth::logout()?,
        Commands::Whoami => commands::auth::whoami()?,
        Commands::Products { action } => match action {
            ProductsAction::List {
                search,
                category,
                min_price,
                max_price,
                all,
            } => commands::products::list(search, category, min_price, max_price, all).await?,
            ProductsAction::Show { id } => commands::products::show(id).await?,
            ProductsAction::Add {
                title,
                description,
                price,
                category,
            } => commands::products::add(title, description, price, category).await?,
            ProductsAction::Update {
                id,
                title,
                description,
                price,
                category,
            } => commands::products::update(id, title, description, price, category).await?,
        },
        Commands::Categories => commands::products::categories().await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add { id, qty } => commands::cart::add(id, qty).await?,
            CartAction::Remove { id } => commands::cart::remove(id)?,
            CartAction::Set { id, qty } => commands::cart::set_quantity(id, qty)?,
            CartAction::Clear => commands::cart::clear()?,
            CartAction::Checkout => commands::cart::checkout()?,
        },
        Commands::Health => commands::health()?,
    }
    Ok(())
}
