//! Request extractors.

pub mod staff;

pub use staff::{BearerIdentity, StaffUser};
