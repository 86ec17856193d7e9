//! Background Tasks Module
//!
//! - TTL Cleanup: removes expired cache entries at a configured interval

mod cleanup;

pub use cleanup::{CleanupTask, Sweep};
