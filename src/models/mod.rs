//! Response models for the cache monitor API

pub mod responses;

pub use responses::{
    CleanupResponse, ClearResponse, ErrorResponse, HealthResponse, StatsResponse,
};
