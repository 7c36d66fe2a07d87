//! # Seed Data Generator
//!
//! Fills a development database with collected stamps so the board and
//! field guide have something to show.
//!
//! ## Usage
//! ```bash
//! # Collect 5 stamps (default)
//! cargo run -p stampzoo-db --bin seed
//!
//! # Fill the whole board
//! cargo run -p stampzoo-db --bin seed -- --count 9
//!
//! # Specify database path, mark every other stamp as a test collection
//! cargo run -p stampzoo-db --bin seed -- --db ./data/stampzoo.db --mixed
//! ```
//!
//! Stamps go through the regular collection transaction, so slots are
//! assigned exactly as they would be for a visitor. Asking for more than
//! nine stops at the first `CapacityReached`.

use std::env;
use stampzoo_core::{CollectOutcome, CollectRequest, GeoPoint, BINGO_CAPACITY};
use stampzoo_db::{Database, DbConfig};
use uuid::Uuid;

/// Facilities stamped onto seeded rows, with a point inside each.
const FACILITIES: &[(&str, f64, f64)] = &[
    ("North Savanna", 35.7148, 139.7713),
    ("Penguin Coast", 35.7153, 139.7730),
    ("Night Forest", 35.7139, 139.7699),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: u32 = 5;
    let mut db_path = String::from("./stampzoo_dev.db");
    let mut mixed = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(5);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--mixed" | "-m" => mixed = true,
            "--help" | "-h" => {
                println!("Stamp Zoo Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of stamps to collect (default: 5, max: 9)");
                println!("  -d, --db <PATH>    Database file path (default: ./stampzoo_dev.db)");
                println!("  -m, --mixed        Mark every other stamp as a test collection");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Stamp Zoo Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Stamps:   {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.stamps().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} stamps", existing);
        println!(
            "  New stamps fill the remaining {} slots.",
            BINGO_CAPACITY.saturating_sub(existing)
        );
    }

    println!();
    let collector = db.collector();
    let mut collected = 0;

    for n in 0..count {
        let animal_id = Uuid::new_v4().to_string();
        let (facility, lat, lon) = FACILITIES[n as usize % FACILITIES.len()];
        let is_test = mixed && n % 2 == 1;
        let source = if is_test {
            format!("stamp_zoo://test/animal/{}", animal_id)
        } else {
            format!("stamp_zoo://animal/{}", animal_id)
        };

        let request = CollectRequest::new(animal_id.as_str(), source, facility)?
            .with_location(GeoPoint::new(lat, lon)?)
            .test_collection(is_test);

        match collector.collect(&request).await? {
            CollectOutcome::Collected { stamp } => {
                collected += 1;
                println!(
                    "  Slot {} ← {} ({}{})",
                    stamp.slot_number,
                    &stamp.animal_id[..8],
                    stamp.facility_name,
                    if stamp.is_test_collection { ", test" } else { "" }
                );
            }
            CollectOutcome::AlreadyCollected => {
                eprintln!("  Duplicate animal id {}, skipping", animal_id);
            }
            CollectOutcome::CapacityReached => {
                println!("  Board is full, stopping");
                break;
            }
        }
    }

    let summary = db.stamps().mode_summary().await?;
    println!();
    println!("✓ Collected {} stamps", collected);
    println!("  Real: {}  Test: {}", summary.real, summary.test);

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
