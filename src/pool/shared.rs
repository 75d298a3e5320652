//! Thread-safe wrapper around a recycling pool
//!
//! No pool operation does long-running work, so one mutex around the whole
//! pool is enough to share it between threads.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    error::{RecyclerError, Result},
    factory::InstanceFactory,
};

use super::{recycling::RecyclingPool, stats::PoolStats};

/// A [`RecyclingPool`] behind an `Arc<Mutex<_>>`
///
/// Clones share the same pool. A poisoned lock is reported as
/// [`RecyclerError::Concurrency`] on every later call.
pub struct SharedRecyclingPool<F: InstanceFactory> {
    inner: Arc<Mutex<RecyclingPool<F>>>,
}

impl<F: InstanceFactory> SharedRecyclingPool<F> {
    /// Wrap an existing pool
    pub fn new(pool: RecyclingPool<F>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Check out an instance and mark it active
    pub fn acquire(&self) -> Result<F::Instance> {
        Ok(self.lock()?.acquire())
    }

    /// Check out an instance without activating it
    pub fn acquire_inactive(&self) -> Result<F::Instance> {
        Ok(self.lock()?.acquire_inactive())
    }

    /// Return a checked-out instance
    pub fn release(&self, instance: F::Instance) -> Result<()> {
        self.lock()?.release(instance)
    }

    /// Move host-deactivated instances back to the available set
    pub fn reclaim(&self) -> Result<usize> {
        Ok(self.lock()?.reclaim())
    }

    /// Create `count` inactive instances ahead of demand
    pub fn pre_warm(&self, count: usize) -> Result<()> {
        self.lock()?.pre_warm(count);
        Ok(())
    }

    /// Check the pool's context, tearing it down if it is gone
    pub fn verify_healthy(&self) -> Result<bool> {
        Ok(self.lock()?.verify_healthy())
    }

    /// Destroy every instance the pool owns
    pub fn dispose(&self) -> Result<()> {
        self.lock()?.dispose();
        Ok(())
    }

    /// Get number of available instances
    pub fn available_count(&self) -> Result<usize> {
        Ok(self.lock()?.available_count())
    }

    /// Get number of checked-out instances
    pub fn in_use_count(&self) -> Result<usize> {
        Ok(self.lock()?.in_use_count())
    }

    /// Snapshot of the pool statistics
    pub fn stats(&self) -> Result<PoolStats> {
        Ok(self.lock()?.stats().clone())
    }

    /// Run `f` with exclusive access to the pool
    pub fn with_pool<R>(&self, f: impl FnOnce(&mut RecyclingPool<F>) -> R) -> Result<R> {
        let mut pool = self.lock()?;
        Ok(f(&mut pool))
    }

    fn lock(&self) -> Result<MutexGuard<'_, RecyclingPool<F>>> {
        self.inner
            .lock()
            .map_err(|_| RecyclerError::concurrency("recycling pool lock poisoned"))
    }
}

impl<F: InstanceFactory> Clone for SharedRecyclingPool<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: InstanceFactory> From<RecyclingPool<F>> for SharedRecyclingPool<F> {
    fn from(pool: RecyclingPool<F>) -> Self {
        Self::new(pool)
    }
}
