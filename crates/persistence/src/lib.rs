//! Persistence layer for the attendance backend.
//!
//! PostgreSQL entities, repositories and connection pool management built
//! on sqlx. The attendance repository is where the ledger's atomicity
//! guarantees (insert-if-absent, last-writer-wins override) live.

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
