//! # Seed Data Generator
//!
//! Populates a store with sample craftsmen and products covering every
//! shipping type, for development and demos.
//!
//! ## Usage
//! ```bash
//! # Seed the store named in crafts.toml / CRAFTS_* variables
//! cargo run -p crafts-db --bin seed
//!
//! # Seed a specific SQLite file
//! cargo run -p crafts-db --bin seed -- --db ./data/crafts.db
//! ```
//!
//! ## Generated Data
//! - One craftsman per region (US, DE, JP, BR, ZA) and one builder
//! - Per craftsman: one product per shipping type, plus a calculated one
//!   carrying its own free-shipping threshold

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use crafts_core::{
    CountryCode, DimensionUnit, Dimensions, MarketProduct, MarketUser, Money,
    ProductShippingDetails, Role, ShippingType, WeightUnit,
};
use crafts_db::repository::product::generate_product_id;
use crafts_db::telemetry::init_tracing;
use crafts_db::{open_store, DataStore, MarketConfig, StoreBackend};

/// (id, display name, country)
const CRAFTSMEN: &[(&str, &str, &str)] = &[
    ("craftsman-ada", "Ada Woodworks", "US"),
    ("craftsman-bea", "Bea Keramik", "DE"),
    ("craftsman-kenji", "Kenji Lacquer", "JP"),
    ("craftsman-lia", "Lia Couros", "BR"),
    ("craftsman-thabo", "Thabo Beadwork", "ZA"),
];

const BUILDER: (&str, &str, &str) = ("builder-carl", "Carl Builds", "US");

#[derive(Debug, Parser)]
#[command(name = "seed")]
#[command(author, version, about = "CraftsMatch seed data generator")]
struct Args {
    /// Config file (default: $CRAFTS_CONFIG or ./crafts.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite file, forces the sqlite backend
    #[arg(short, long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();

    let mut config = MarketConfig::load(args.config)?;
    if let Some(path) = args.db {
        config.store.backend = StoreBackend::Sqlite;
        config.store.database_path = path;
    }

    if config.store.backend == StoreBackend::Memory {
        warn!("Seeding the memory backend; data is discarded when this process exits");
    }

    let store = open_store(&config).await?;
    let currency = config.shipping.currency.clone();

    if store.get_user(CRAFTSMEN[0].0).await?.is_some() {
        println!("Store already seeded; delete the database file to regenerate.");
        return Ok(());
    }

    let (id, name, country) = BUILDER;
    store.insert_user(&user(id, name, Role::Builder, country)?).await?;

    let mut products = 0;
    for (seed, (id, name, country)) in CRAFTSMEN.iter().enumerate() {
        let craftsman = store
            .insert_user(&user(id, name, Role::Craftsman, country)?)
            .await?;

        for product in catalogue(&craftsman, &currency, seed) {
            store.insert_product(&product).await?;
            println!(
                "{}  {:<28} {:<10} seller={} ({})",
                product.id,
                product.name,
                product.shipping.shipping_type,
                craftsman.id,
                craftsman.country
            );
            products += 1;
        }
    }

    info!(
        backend = %config.store.backend,
        users = CRAFTSMEN.len() + 1,
        products,
        "Seed complete"
    );
    Ok(())
}

fn user(
    id: &str,
    name: &str,
    role: Role,
    country: &str,
) -> Result<MarketUser, Box<dyn std::error::Error>> {
    Ok(MarketUser {
        id: id.to_string(),
        display_name: name.to_string(),
        role,
        country: CountryCode::parse(country)?,
        created_at: Utc::now(),
    })
}

/// One product per shipping type, plus one with its own free-shipping threshold.
fn catalogue(seller: &MarketUser, currency: &str, seed: usize) -> Vec<MarketProduct> {
    let now = Utc::now();
    let step = seed as i64;

    let product = |name: &str, price_cents: i64, shipping: ProductShippingDetails| MarketProduct {
        id: generate_product_id(),
        seller_id: seller.id.clone(),
        name: format!("{} {}", seller.display_name.split(' ').next().unwrap_or("Studio"), name),
        description: None,
        price: Money::from_cents(price_cents),
        currency: currency.to_string(),
        shipping,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    let mut bowl = ProductShippingDetails::calculated(1.2 + seed as f64 * 0.4);
    bowl.dimensions = Some(Dimensions {
        length: 30.0,
        width: 30.0,
        height: 12.0,
        unit: DimensionUnit::Cm,
    });
    bowl.lead_time_days = 2;

    let mut pendant = ProductShippingDetails::flat(Money::from_cents(450 + step * 50));
    pendant.weight = 80.0;
    pendant.weight_unit = WeightUnit::G;

    let mut blanket = ProductShippingDetails::calculated(2.0).with_type(ShippingType::Free);
    blanket.lead_time_days = 5;

    let mut table = ProductShippingDetails::calculated(35.0).with_type(ShippingType::Manual);
    table.lead_time_days = 21;

    let mut lamp = ProductShippingDetails::calculated(1.5);
    lamp.free_shipping_threshold = Some(Money::from_cents(15_000));

    vec![
        product("Turned Bowl", 4_800 + step * 300, bowl),
        product("Pendant", 2_200 + step * 100, pendant),
        product("Woven Blanket", 12_900, blanket),
        product("Dining Table", 189_000, table),
        product("Table Lamp", 7_500 + step * 250, lamp),
    ]
}
