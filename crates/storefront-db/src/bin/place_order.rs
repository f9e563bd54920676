//! # Place Order
//!
//! Places an order from the command line and prints it as JSON.
//!
//! ## Usage
//! ```bash
//! cargo run -p storefront-db --bin place-order -- \
//!     --customer <CUSTOMER_ID> \
//!     --item <PRODUCT_ID>:2 --item <PRODUCT_ID>:1
//! ```
//!
//! Exit status is 1 when the order is rejected (unknown customer or
//! product, not enough stock) and 2 for usage errors.

use std::env;
use std::process::ExitCode;

use storefront_core::OrderProductRequest;
use storefront_db::{telemetry, Database, StoreConfig};
use tracing::error;

struct Args {
    customer_id: String,
    items: Vec<OrderProductRequest>,
    db_path: Option<String>,
}

fn usage() {
    println!("Storefront Order Placement");
    println!();
    println!("Usage: place-order --customer <ID> --item <PRODUCT_ID:QTY> [--item ...] [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --customer <ID>          Customer placing the order");
    println!("  -i, --item <PRODUCT_ID:QTY>  Requested product and quantity (repeatable)");
    println!("  -d, --db <PATH>              Database file path (default: $STOREFRONT_DB_PATH or ./storefront.db)");
    println!("  -h, --help                   Show this help message");
}

/// Parses `PRODUCT_ID:QTY`.
fn parse_item(raw: &str) -> Result<OrderProductRequest, String> {
    let (id, quantity) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected PRODUCT_ID:QTY, got '{raw}'"))?;
    let quantity = quantity
        .parse::<i64>()
        .map_err(|_| format!("invalid quantity in '{raw}'"))?;

    Ok(OrderProductRequest::new(id, quantity))
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut customer_id = None;
    let mut items = Vec::new();
    let mut db_path = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--customer" | "-c" | "--item" | "-i" | "--db" | "-d" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("missing value for {flag}"))?;
                match flag {
                    "--customer" | "-c" => customer_id = Some(value.clone()),
                    "--item" | "-i" => items.push(parse_item(value)?),
                    _ => db_path = Some(value.clone()),
                }
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument '{other}'")),
        }
        i += 1;
    }

    let customer_id = customer_id.ok_or("--customer is required")?;
    if items.is_empty() {
        return Err("at least one --item is required".to_string());
    }

    Ok(Some(Args {
        customer_id,
        items,
        db_path,
    }))
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();

    let raw: Vec<String> = env::args().collect();
    let args = match parse_args(&raw) {
        Ok(Some(args)) => args,
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

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Order not placed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StoreConfig::load()?;
    if let Some(path) = args.db_path {
        config = config.with_database_path(path);
    }

    let db = Database::new(config.db_config()).await?;

    let result = db
        .create_order_service()
        .execute(&args.customer_id, &args.items)
        .await;

    db.close().await;

    let order = result?;
    println!("{}", serde_json::to_string_pretty(&order)?);

    Ok(())
}
