//! Storage backends.
//!
//! `sqlite` implements the repository traits from `doable_core::storage`
//! against the on-disk relational store; `s3` is the object-storage client
//! used by the upload endpoint.

pub mod s3;
pub mod sqlite;

pub use sqlite::SqliteRepository;
