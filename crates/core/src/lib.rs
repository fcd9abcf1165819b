//! Core domain types and storage contracts for doable.
//!
//! This crate is pure: no I/O, no HTTP framework, no database driver.
//! The server crate implements the repository traits defined here.

pub mod auth;
pub mod model;
pub mod storage;
