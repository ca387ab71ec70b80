//! API endpoint handlers.

pub mod cases;
pub mod health;
