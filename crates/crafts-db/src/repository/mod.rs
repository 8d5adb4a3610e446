//! # Repository Module
//!
//! SQL for the SQLite backend, one repository per table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Database (DataStore impl)                                              │
//! │       │                                                                 │
//! │       ├── db.users()     → UserRepository                               │
//! │       │                    insert, get_by_id                            │
//! │       │                                                                 │
//! │       └── db.products()  → ProductRepository                            │
//! │                            insert, get_by_id, list_by_seller            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FromRow structs (TEXT enums, cents) ──TryFrom──► crafts-core types     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
pub mod user;
