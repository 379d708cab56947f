//! HTTP route handlers.

pub mod attendance;
pub mod health;
pub mod meta;
pub mod staff;
pub mod students;
