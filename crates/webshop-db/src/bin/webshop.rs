//! # Webshop Demo
//!
//! Opens the catalog store, seeds it when empty, prints the catalog and the
//! inventory report, and optionally places an order or writes the JSON
//! snapshot.
//!
//! ## Usage
//! ```bash
//! # Open ./webshop.db (seeding on first run) and print the dashboard
//! cargo run -p webshop-db --bin webshop
//!
//! # Start from a fresh catalog, order two laptops, export the snapshot
//! cargo run -p webshop-db --bin webshop -- --reset --order 1:2 --snapshot static/inventory.json
//! ```

use std::env;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use webshop_db::{Database, DbConfig, InventorySnapshot, OrderError};

/// Parsed command line options.
#[derive(Debug, Default)]
struct Options {
    db_path: Option<String>,
    reset: bool,
    order: Option<(i64, i64)>,
    snapshot: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let options = match parse_args(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            print_help();
            return ExitCode::FAILURE;
        }
    };

    match run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Webshop demo failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = DbConfig::from_env();
    if let Some(path) = options.db_path {
        config.database_path = path.into();
    }
    if options.reset {
        config.reset_on_start = true;
    }

    let db = Database::new(config).await?;
    info!("Database ready");

    println!("Webshop");
    println!("=======");
    for product in db.products().list_all().await? {
        println!(
            "#{:<3} {:<20} {:>12}  {}",
            product.id,
            product.name,
            product.price().to_string(),
            product.description.as_deref().unwrap_or("N/A")
        );
    }

    if let Some((product_id, quantity)) = options.order {
        println!();
        match db.orders().process_order(product_id, quantity).await {
            Ok(order) => println!(
                "Ordered {} x product {} for {} (order #{})",
                order.quantity,
                order.product_id,
                order.total_price(),
                order.id
            ),
            Err(OrderError::Rejected(reason)) => println!("Order rejected: {reason}"),
            Err(OrderError::Storage(e)) => return Err(e.into()),
        }
    }

    let snapshot = InventorySnapshot::capture(&db).await?;

    println!();
    println!("Inventory");
    println!("=========");
    println!(
        "{:<20} {:>9} {:>9} {:>9}  {}",
        "NAME", "STOCK", "MINIMUM", "ORDER", "SUPPLIER EMAIL"
    );
    for row in &snapshot.rows {
        println!(
            "{:<20} {:>9} {:>9} {:>9}  {}{}",
            row.name,
            row.stock_quantity,
            row.minimum_stock,
            row.order_quantity,
            row.supplier_contact.as_deref().unwrap_or("-"),
            if row.below_minimum() { "  (restock)" } else { "" }
        );
    }

    if let Some(path) = options.snapshot {
        snapshot.write_json(&path)?;
        println!();
        println!("Snapshot written to {path}");
    }

    db.close().await;
    Ok(())
}

/// Parses arguments. `Ok(None)` means help was requested.
fn parse_args(args: impl Iterator<Item = String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" | "-d" => {
                options.db_path = Some(args.next().ok_or("--db needs a path")?);
            }
            "--reset" => options.reset = true,
            "--order" | "-o" => {
                let spec = args.next().ok_or("--order needs <product_id>:<quantity>")?;
                options.order = Some(parse_order(&spec)?);
            }
            "--snapshot" | "-s" => {
                options.snapshot = Some(args.next().ok_or("--snapshot needs a path")?);
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(Some(options))
}

fn parse_order(spec: &str) -> Result<(i64, i64), String> {
    let (id, qty) = spec
        .split_once(':')
        .ok_or_else(|| format!("Expected <product_id>:<quantity>, got '{spec}'"))?;
    let id = id
        .trim()
        .parse()
        .map_err(|_| format!("Invalid product id '{id}'"))?;
    let qty = qty
        .trim()
        .parse()
        .map_err(|_| format!("Invalid quantity '{qty}'"))?;
    Ok((id, qty))
}

fn print_help() {
    println!("Webshop demo");
    println!();
    println!("Usage: webshop [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>          Database file (default: $WEBSHOP_DB_PATH or ./webshop.db)");
    println!("      --reset              Delete all rows before seeding");
    println!("  -o, --order <ID>:<QTY>   Place one order");
    println!("  -s, --snapshot <PATH>    Write the inventory snapshot as JSON");
    println!("  -h, --help               Show this help message");
}

/// Initializes the tracing subscriber.
///
/// Default filter: `info,webshop=debug,sqlx=warn`; override with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,webshop=debug,webshop_db=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
