//! API Module
//!
//! HTTP monitor exposing cache statistics and maintenance actions.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
