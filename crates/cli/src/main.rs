//! Laptop marketplace CLI.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! lm-cli browse --term apple --sort price-low
//! lm-cli browse --brand Lenovo --condition new --max 1800
//!
//! # Manage the cart
//! lm-cli cart add 3
//! lm-cli cart set 3 2
//! lm-cli cart show
//!
//! # Edit listings (sign in first)
//! lm-cli login -u admin -p admin123
//! lm-cli catalog add --name "XPS 15" --brand Dell --price 1899.00
//! lm-cli catalog delete 1
//! ```
//!
//! # Commands
//!
//! - `catalog` - List and edit listings
//! - `browse` - Filtered, sorted catalog view
//! - `facets` - Brands, conditions and price range in the catalog
//! - `cart` - Show and edit the cart
//! - `login` / `logout` / `whoami` - Session management
//!
//! State lives in the redb file named by `MARKET_DATA_PATH`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use laptop_market_core::{Condition, ItemId};
use laptop_market_storefront::config::MarketConfig;
use laptop_market_storefront::error::AppError;

mod commands;

#[derive(Parser)]
#[command(name = "lm-cli")]
#[command(author, version, about = "Laptop marketplace CLI")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Override `MARKET_DATA_PATH`
    #[arg(long, global = true)]
    data_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and edit catalog listings
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show a filtered, sorted catalog view
    Browse(BrowseArgs),
    /// Show brands, conditions and price range present in the catalog
    Facets,
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List every listing in insertion order
    List,
    /// Create a listing (requires sign-in)
    Add(commands::catalog::ListingArgs),
    /// Change fields of a listing (requires sign-in)
    Update {
        id: ItemId,

        #[command(flatten)]
        changes: commands::catalog::ListingChanges,
    },
    /// Delete a listing (requires sign-in)
    Delete { id: ItemId },
}

#[derive(clap::Args)]
struct BrowseArgs {
    /// Case-insensitive match on name, brand or processor
    #[arg(short, long, default_value = "")]
    term: String,

    /// Exact brand
    #[arg(short, long)]
    brand: Option<String>,

    /// `new`, `used` or `refurbished`
    #[arg(short, long)]
    condition: Option<Condition>,

    /// Inclusive minimum price
    #[arg(long)]
    min: Option<Decimal>,

    /// Inclusive maximum price
    #[arg(long)]
    max: Option<Decimal>,

    /// `name`, `price-low`, `price-high` or `rating`
    #[arg(short, long, default_value = "name")]
    sort: String,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show lines and totals
    Show,
    /// Add one unit of a catalog item
    Add { id: ItemId },
    /// Remove a line
    Remove { id: ItemId },
    /// Set a line's quantity; zero or less removes it
    Set {
        id: ItemId,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

fn init_tracing(json: bool) {
    // Defaults to info level for the storefront if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "laptop_market_storefront=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = MarketConfig::from_env()?;
    if let Some(path) = cli.data_path {
        config.data_path = path;
    }
    let mut storefront = commands::open(&config)?;

    let result = match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List => {
                commands::catalog::list(&storefront);
                Ok(())
            }
            CatalogAction::Add(args) => commands::catalog::add(&mut storefront, args),
            CatalogAction::Update { id, changes } => {
                commands::catalog::update(&mut storefront, &id, changes)
            }
            CatalogAction::Delete { id } => commands::catalog::delete(&mut storefront, &id),
        },
        Commands::Browse(args) => {
            commands::browse::browse(&storefront, &args.into_query());
            Ok(())
        }
        Commands::Facets => {
            commands::browse::facets(&storefront);
            Ok(())
        }
        Commands::Cart { action } => match action {
            CartAction::Show => {
                commands::cart::show(&storefront);
                Ok(())
            }
            CartAction::Add { id } => commands::cart::add(&mut storefront, &id),
            CartAction::Remove { id } => commands::cart::remove(&mut storefront, &id),
            CartAction::Set { id, quantity } => {
                commands::cart::set(&mut storefront, &id, quantity)
            }
            CartAction::Clear => {
                commands::cart::clear(&mut storefront);
                Ok(())
            }
        },
        Commands::Login { username, password } => {
            commands::auth::login(&mut storefront, &username, &password)
        }
        Commands::Logout => {
            commands::auth::logout(&mut storefront);
            Ok(())
        }
        Commands::Whoami => commands::auth::whoami(&storefront),
    };

    storefront.teardown();
    result
}

impl BrowseArgs {
    fn into_query(self) -> laptop_market_storefront::search::QuerySpec {
        use laptop_market_storefront::search::{QuerySpec, SortKey};

        let mut query = QuerySpec::new()
            .with_term(self.term)
            .with_price_range(self.min, self.max)
            .sorted_by(SortKey::parse(&self.sort));
        if let Some(brand) = self.brand {
            query = query.with_brand(brand);
        }
        if let Some(condition) = self.condition {
            query = query.with_condition(condition);
        }
        query
    }
}
