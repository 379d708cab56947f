//! Decision services.

pub mod geofence;
pub mod ledger;
pub mod schedule;
