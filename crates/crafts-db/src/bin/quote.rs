//! # Shipping Quote CLI
//!
//! Prints a shipping quote for a stored product, or for every product of a
//! seller's storefront.
//!
//! ## Usage
//! ```bash
//! # One product, cheapest available method
//! cargo run -p crafts-db --bin quote -- --product <ID> --to DE
//!
//! # Pick method and quantity, JSON output
//! cargo run -p crafts-db --bin quote -- --product <ID> --to US --method express --qty 3 --json
//!
//! # Whole storefront
//! cargo run -p crafts-db --bin quote -- --seller craftsman-ada --to JP
//! ```

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracing::warn;

use crafts_core::checkout::OrderTotals;
use crafts_core::{CountryCode, Money, ShippingEstimate, ShippingMethod};
use crafts_db::telemetry::init_tracing;
use crafts_db::{open_store, DataStore, MarketConfig, QuoteRequest, QuoteService, ShippingQuote};

#[derive(Debug, Parser)]
#[command(name = "quote")]
#[command(author, version, about = "CraftsMatch shipping quote")]
#[command(group(ArgGroup::new("target").required(true).args(["product", "seller"])))]
struct Args {
    /// Product to quote
    #[arg(short, long)]
    product: Option<String>,

    /// Quote every active product of this seller
    #[arg(short, long)]
    seller: Option<String>,

    /// Destination, ISO 3166-1 alpha-2 (e.g. DE)
    #[arg(short, long)]
    to: CountryCode,

    /// standard | express | overnight | manual
    #[arg(short, long)]
    method: Option<ShippingMethod>,

    /// Quantity per product
    #[arg(short, long, default_value_t = 1)]
    qty: u32,

    /// Config file (default: $CRAFTS_CONFIG or ./crafts.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();

    let config = MarketConfig::load(args.config.clone())?;
    let store = open_store(&config).await?;
    let service = QuoteService::new(store, config.shipping_rules());

    let product_ids: Vec<String> = match (args.product, args.seller.as_deref()) {
        (Some(product), _) => vec![product],
        (None, Some(seller)) => service
            .store()
            .list_products_by_seller(seller)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect(),
        (None, None) => Vec::new(),
    };

    if product_ids.is_empty() {
        warn!("No active products to quote");
    }

    let mut quotes = Vec::with_capacity(product_ids.len());
    for product_id in product_ids {
        let mut request = QuoteRequest::new(product_id, args.to.clone()).quantity(args.qty);
        request.method = args.method;

        let (quote, summary) = service.quote_with_summary(&request).await?;
        quotes.push((quote, OrderTotals::from(&summary)));
    }

    if args.json {
        let out: Vec<_> = quotes
            .iter()
            .map(|(quote, totals)| serde_json::json!({ "quote": quote, "totals": totals }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (quote, totals) in &quotes {
            print_quote(quote, totals);
        }
    }

    Ok(())
}

fn print_quote(quote: &ShippingQuote, totals: &OrderTotals) {
    let methods: Vec<&str> = quote.methods.iter().map(|m| m.as_str()).collect();

    println!("Product   {}", quote.product_id);
    println!("Route     {} -> {}", quote.origin, quote.destination);
    println!(
        "Methods   {}",
        if methods.is_empty() {
            "(not shipped here)".to_string()
        } else {
            methods.join(", ")
        }
    );
    if let Some(method) = quote.method {
        println!("Method    {}", method);
    }
    match &quote.cost {
        ShippingEstimate::Free => println!("Shipping  free"),
        ShippingEstimate::Amount { amount } => println!("Shipping  {} {}", amount, quote.currency),
        ShippingEstimate::Unknown { reason } => println!("Shipping  unknown ({})", reason),
    }
    if let Some(delivery) = quote.delivery {
        println!("Delivery  {}", delivery);
    }
    println!("Goods     {} {}", quote.order_value, quote.currency);
    println!("Total     {}", totals_line(totals, &quote.currency));
    println!();
}

fn totals_line(totals: &OrderTotals, currency: &str) -> String {
    let subtotal = Money::from_cents(totals.subtotal_cents);
    match totals.total_cents {
        Some(total) => format!("{} {}", Money::from_cents(total), currency),
        None => format!("{} {} + shipping", subtotal, currency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parses_product_quote() {
        let args = Args::try_parse_from([
            "quote", "-p", "p-1", "--to", "de", "--method", "express", "--qty", "3", "--json",
        ])
        .unwrap();

        assert_eq!(args.product.as_deref(), Some("p-1"));
        assert_eq!(args.to.as_str(), "DE");
        assert_eq!(args.method, Some(ShippingMethod::Express));
        assert_eq!(args.qty, 3);
        assert!(args.json);
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let args = Args::try_parse_from(["quote", "--seller", "craftsman-ada", "--to", "JP"]).unwrap();
        assert_eq!(args.qty, 1);
        assert_eq!(args.method, None);
        assert!(args.product.is_none());
    }

    #[test]
    fn test_exactly_one_target() {
        assert!(Args::try_parse_from(["quote", "--to", "DE"]).is_err());
        assert!(
            Args::try_parse_from(["quote", "-p", "p-1", "-s", "craftsman-ada", "--to", "DE"]).is_err()
        );
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(Args::try_parse_from(["quote", "-p", "p-1"]).is_err());
        assert!(Args::try_parse_from(["quote", "-p", "p-1", "--to", "Germany"]).is_err());
        assert!(Args::try_parse_from(["quote", "-p", "p-1", "--to", "DE", "-m", "pigeon"]).is_err());
        assert!(Args::try_parse_from(["quote", "-p", "p-1", "--to", "DE", "--qty", "-2"]).is_err());
    }
}
