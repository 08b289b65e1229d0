//! Griffin CLI - operate the storefront data layer from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the resolved catalog in Arabic
//! griffin --locale ar catalog list
//!
//! # Add two of product 3 (default variant) and check out
//! griffin cart add 3 --quantity 2
//! griffin cart checkout --payment cash
//!
//! # Connect a WooCommerce store
//! griffin woo configure --site-url https://shop.example.com --key ck_... --secret cs_...
//! ```
//!
//! # Commands
//!
//! - `cart` - List, add, update, remove, clear, checkout
//! - `catalog` - Resolved product catalog (local or remote)
//! - `products` - Admin-managed product collection
//! - `services` - Service cards
//! - `woo` - WooCommerce connection settings
//!
//! Records are stored under `GRIFFIN_DATA_DIR` (default `.griffin`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use griffin_core::{CartItemId, Locale, ProductId, VariantId};
use griffin_storefront::checkout::PaymentMethod;
use griffin_storefront::config::StorefrontConfig;
use griffin_storefront::{AppError, Storefront};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "griffin")]
#[command(author, version, about = "Griffin storefront CLI")]
struct Cli {
    /// Display language (`en` or `ar`)
    #[arg(long, global = true, default_value = "en")]
    locale: Locale,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the resolved product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the admin product collection
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Browse service cards
    Services {
        #[command(subcommand)]
        action: ServicesAction,
    },
    /// Manage the WooCommerce connection
    Woo {
        #[command(subcommand)]
        action: WooAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart rows, item count and total
    List,
    /// Add a catalog product to the cart
    Add {
        /// Product id
        product_id: String,

        /// Variant id (default: the product's first variant)
        #[arg(short, long)]
        variant: Option<String>,

        /// Quantity; anything but a positive whole number counts as 1
        #[arg(short, long, default_value = "1")]
        quantity: String,
    },
    /// Remove a cart row
    Remove {
        /// Cart row id
        item_id: String,
    },
    /// Change a row's quantity (0 removes the row)
    Update {
        /// Cart row id
        item_id: String,

        /// New quantity
        quantity: u32,
    },
    /// Empty the cart
    Clear,
    /// Place an order for the cart contents
    Checkout {
        /// Payment method (`instapay`, `smart_wallet`, `cash`)
        #[arg(short, long, default_value = "instapay")]
        payment: PaymentMethod,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List resolved products and where they came from
    List,
    /// Show one product with its variants and related products
    Show {
        /// Product id
        product_id: String,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// Seed the demo products if the collection is empty
    Seed,
    /// List all admin-managed products
    List,
    /// Show one product
    Show {
        /// Product id
        product_id: String,
    },
    /// Create or replace a product
    Save(commands::products::SaveArgs),
    /// Delete a product
    Delete {
        /// Product id
        product_id: String,
    },
    /// List featured products
    Featured {
        /// Number of products (default 4)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand)]
enum ServicesAction {
    /// List local services followed by remote ones
    List,
}

#[derive(Subcommand)]
enum WooAction {
    /// Store WooCommerce REST API credentials
    Configure {
        /// Store URL (e.g. <https://shop.example.com>)
        #[arg(long)]
        site_url: String,

        /// Consumer key (`ck_...`)
        #[arg(long)]
        key: String,

        /// Consumer secret (`cs_...`)
        #[arg(long)]
        secret: String,
    },
    /// Show the stored connection (credentials redacted)
    Show,
    /// Remove the stored connection
    Clear,
}

fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let locale = cli.locale;

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => return failure(&AppError::from(e), locale),
    };

    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "griffin_storefront=info,griffin_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Returning lets the Sentry guard drop and flush queued events.
    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => failure(&e, locale),
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> griffin_storefront::Result<()> {
    let storefront = Storefront::open(config)?;
    storefront.initialize()?;
    let locale = cli.locale;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&storefront, locale),
            CartAction::Add {
                product_id,
                variant,
                quantity,
            } => {
                commands::cart::add(
                    &storefront,
                    locale,
                    &ProductId::new(product_id),
                    variant.map(VariantId::new).as_ref(),
                    &quantity,
                )
                .await?;
            }
            CartAction::Remove { item_id } => {
                commands::cart::remove(&storefront, locale, &CartItemId::new(item_id))?;
            }
            CartAction::Update { item_id, quantity } => {
                commands::cart::update(&storefront, locale, &CartItemId::new(item_id), quantity)?;
            }
            CartAction::Clear => commands::cart::clear(&storefront)?,
            CartAction::Checkout { payment } => {
                commands::cart::checkout(&storefront, locale, payment).await?;
            }
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(&storefront, locale).await,
            CatalogAction::Show { product_id } => {
                commands::catalog::show(&storefront, locale, &ProductId::new(product_id)).await?;
            }
        },
        Commands::Products { action } => match action {
            ProductsAction::Seed => commands::products::seed(&storefront)?,
            ProductsAction::List => commands::products::list(&storefront, locale),
            ProductsAction::Show { product_id } => {
                commands::products::show(&storefront, locale, &ProductId::new(product_id))?;
            }
            ProductsAction::Save(args) => commands::products::save(&storefront, args)?,
            ProductsAction::Delete { product_id } => {
                commands::products::delete(&storefront, &ProductId::new(product_id))?;
            }
            ProductsAction::Featured { limit } => {
                commands::products::featured(&storefront, locale, limit);
            }
        },
        Commands::Services { action } => match action {
            ServicesAction::List => commands::services::list(&storefront, locale).await,
        },
        Commands::Woo { action } => match action {
            WooAction::Configure {
                site_url,
                key,
                secret,
            } => commands::woo::configure(&storefront, &site_url, &key, &secret)?,
            WooAction::Show => commands::woo::show(&storefront),
            WooAction::Clear => commands::woo::clear(&storefront)?,
        },
    }
    Ok(())
}

/// Report `err` and print the customer-facing message.
#[allow(clippy::print_stderr)]
fn failure(err: &AppError, locale: Locale) -> ExitCode {
    err.report();
    eprintln!("{}", err.user_message(locale));
    if !err.is_internal() {
        eprintln!("({err})");
    }
    ExitCode::FAILURE
}
