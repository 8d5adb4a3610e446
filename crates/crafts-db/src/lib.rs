//! # crafts-db: Storage, Configuration and Quotes for CraftsMatch
//!
//! Everything around the pure shipping core that touches the outside world:
//! a data store for users and products, configuration loading, and a quote
//! service that combines the two.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CraftsMatch Data Flow                            │
//! │                                                                         │
//! │  bin/quote, checkout backend                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    crafts-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐   │   │
//! │  │   │ MarketConfig │──►│  open_store  │──►│  QuoteService<S> │   │   │
//! │  │   │ (config.rs)  │   │  (store.rs)  │   │   (quote.rs)     │   │   │
//! │  │   └──────────────┘   └──────┬───────┘   └────────┬─────────┘   │   │
//! │  │                             │                    │              │   │
//! │  │              ┌──────────────┴───────┐            │              │   │
//! │  │              ▼                      ▼            ▼              │   │
//! │  │        Database (SQLite)      MemoryStore    crafts-core        │   │
//! │  │        repositories +                        shipping rules     │   │
//! │  │        migrations                                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - `MarketConfig` from TOML and `CRAFTS_*` variables
//! - [`store`] - `DataStore` trait, `AnyStore`, `open_store`
//! - [`pool`] - SQLite pool (`Database`, `DbConfig`)
//! - [`memory`] - In-memory store
//! - [`repository`] - SQL per table
//! - [`migrations`] - Embedded migrations
//! - [`quote`] - `QuoteService`
//! - [`error`] - Store and config errors
//! - [`telemetry`] - Log subscriber setup for the binaries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crafts_db::{open_store, MarketConfig, QuoteRequest, QuoteService};
//!
//! let config = MarketConfig::load(None)?;
//! let store = open_store(&config).await?;
//! let service = QuoteService::new(store, config.shipping_rules());
//!
//! let quote = service.quote(&QuoteRequest::new(product_id, "DE".parse()?)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod quote;
pub mod repository;
pub mod store;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{MarketConfig, StoreBackend};
pub use error::{ConfigError, DbError, DbResult};
pub use memory::MemoryStore;
pub use pool::{Database, DbConfig};
pub use quote::{QuoteError, QuoteRequest, QuoteService, ShippingQuote};
pub use store::{open_store, AnyStore, DataStore};

pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
