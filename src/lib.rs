//! # Recycler - Bounded Recycling Object Pool
//!
//! Recycler keeps a growing set of reusable instances of one kind, tracking
//! which are checked out and which are waiting, and repairs its own
//! bookkeeping when the host deactivates instances behind its back.
//!
//! ## Features
//!
//! - **Pre-warming**: instances are created ahead of demand, at construction or any time later
//! - **Lazy reclaim**: an exhausted checkout first recovers instances the host deactivated
//! - **Strict check-in**: releasing an instance the pool does not consider checked out is an error
//! - **Self-healing**: a pool whose holder or template died tears itself down
//! - **Engine agnostic**: all host interaction goes through the [`InstanceFactory`] trait
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               RecyclingPool<F>               │
//! ├──────────────────────┬───────────────────────┤
//! │  available (front →) │  in_use               │
//! │  acquire ──────────────────►                 │
//! │          ◄────────────────── release         │
//! │          ◄──── reclaim (inactive in_use)     │
//! └──────────────────────┴───────────────────────┘
//!           │  create / destroy / set_active / is_active
//!           ▼
//! ┌──────────────────────────────────────────────┐
//! │    InstanceFactory (host engine, arena)      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use recycler::{ArenaFactory, InstanceFactory, RecyclingPool};
//!
//! let factory = ArenaFactory::new();
//! let template = factory.register_template("spark");
//! let holder = factory.register_holder();
//!
//! let mut pool = RecyclingPool::with_prewarm(factory.clone(), template, holder, 2);
//! let spark = pool.acquire();
//! assert!(factory.is_active(&spark));
//!
//! pool.release(spark).unwrap();
//! assert_eq!(pool.available_count(), 2);
//! ```

pub mod error;
pub mod factory;
pub mod pool;

pub use error::{RecyclerError, Result};
pub use factory::{
    ArenaFactory, HolderId, InstanceFactory, InstanceFactoryExt, InstanceId, InstanceRecord,
    TemplateId,
};
pub use pool::{
    Activation, PoolConfig, PoolConfigBuilder, PoolStats, RecyclingPool, SharedRecyclingPool,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
