//! Shared utilities and common types for the attendance backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Identity token (JWT) verification
//! - Coordinate and accuracy validation
//! - Client app version comparison

pub mod jwt;
pub mod validation;
pub mod version;
