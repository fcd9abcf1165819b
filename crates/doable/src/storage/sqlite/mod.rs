//! SQLite storage backend.
//!
//! SQL statements live in `schema`, pure row/value conversions in
//! `conversions`, driver-error mapping in `error`, and the repository
//! trait implementations in `repository`.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
