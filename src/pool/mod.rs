//! Recycling pools
//!
//! This module provides the pool itself, its configuration and statistics,
//! and a mutex-guarded wrapper for sharing a pool across threads.

pub mod config;
pub mod recycling;
pub mod shared;
pub mod stats;

// Re-export main types
pub use config::{PoolConfig, PoolConfigBuilder, DEFAULT_GROWTH_COUNT, DEFAULT_PREWARM_COUNT};
pub use recycling::{Activation, RecyclingPool};
pub use shared::SharedRecyclingPool;
pub use stats::PoolStats;
