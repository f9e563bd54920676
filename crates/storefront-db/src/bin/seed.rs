//! # Seed Data Generator
//!
//! Populates the database with demo customers and products for development.
//!
//! ## Usage
//! ```bash
//! # Seed the database from STOREFRONT_DB_PATH (default ./storefront.db)
//! cargo run -p storefront-db --bin seed
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```
//!
//! Products go through `CreateProductService`, so they get the same
//! validation and duplicate-name checks as any other registration.

use std::env;
use std::process::ExitCode;

use storefront_core::Money;
use storefront_db::{telemetry, Database, StoreConfig};

/// Demo customers: (name, email).
const CUSTOMERS: &[(&str, &str)] = &[
    ("Ada Lovelace", "ada@example.com"),
    ("Grace Hopper", "grace@example.com"),
    ("Alan Turing", "alan@example.com"),
];

/// Demo catalog: (name, price in cents, quantity).
const PRODUCTS: &[(&str, i64, i64)] = &[
    ("Mechanical Keyboard", 8999, 25),
    ("Wireless Mouse", 2499, 40),
    ("27in Monitor", 27900, 8),
    ("USB-C Hub", 3450, 30),
    ("Laptop Stand", 4200, 15),
    ("Desk Lamp", 2450, 12),
    ("Webcam 1080p", 5999, 10),
    ("Noise Cancelling Headphones", 19900, 5),
    ("Ergonomic Chair", 34900, 3),
    ("Cable Organizer", 899, 100),
];

fn usage() {
    println!("Storefront Seed Data Generator");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>    Database file path (default: $STOREFRONT_DB_PATH or ./storefront.db)");
    println!("  -h, --help         Show this help message");
}

/// Returns `Ok(None)` when help was requested, otherwise the `--db` override.
fn parse_args(args: &[String]) -> Result<Option<Option<String>>, String> {
    let mut db_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("missing value for {}", args[i]))?;
                db_path = Some(value.clone());
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument '{other}'")),
        }
        i += 1;
    }

    Ok(Some(db_path))
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();

    let raw: Vec<String> = env::args().collect();
    let db_path = match parse_args(&raw) {
        Ok(Some(db_path)) => db_path,
        Ok(None) => {
            usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            usage();
            return ExitCode::from(2);
        }
    };

    match run(db_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(db_path: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StoreConfig::load()?;
    if let Some(path) = db_path {
        config = config.with_database_path(path);
    }

    println!("🌱 Storefront Seed Data Generator");
    println!("=================================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config.db_config()).await?;

    println!("✓ Connected to database");

    let result = seed(&db).await;
    db.close().await;
    result
}

async fn seed(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Customers:");
    let customers = db.create_customer_service();
    for (name, email) in CUSTOMERS {
        match customers.execute(name, email).await {
            Ok(customer) => println!("  {}  {} <{}>", customer.id, customer.name, customer.email),
            Err(e) => eprintln!("Failed to create customer {}: {}", email, e),
        }
    }

    println!();
    println!("Products:");
    let products = db.create_product_service();
    for (name, price_cents, quantity) in PRODUCTS {
        match products.execute(name, *price_cents, *quantity).await {
            Ok(product) => println!(
                "  {}  {} @ {} ({} in stock)",
                product.id,
                product.name,
                Money::from_cents(product.price_cents),
                product.quantity
            ),
            Err(e) => eprintln!("Failed to create product {}: {}", name, e),
        }
    }

    println!();
    println!(
        "✓ Seed complete! {} customers, {} products",
        db.customers().count().await?,
        db.products().count().await?
    );

    Ok(())
}
