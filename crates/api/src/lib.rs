//! Geo-fenced attendance backend HTTP surface.
//!
//! Config, error mapping, middleware and route handlers over the domain
//! decision services and the persistence repositories.

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
