//! Domain layer for the attendance backend.
//!
//! This crate contains:
//! - Domain models (Student, SubjectClass, attendance records)
//! - The decision services: geofence validation, schedule selection,
//!   attendance status resolution

pub mod models;
pub mod services;
