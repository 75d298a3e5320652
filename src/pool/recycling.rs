//! Recycling pool implementation

use std::{collections::VecDeque, fmt};

use crate::{
    error::{RecyclerError, Result},
    factory::{InstanceFactory, InstanceFactoryExt},
};

use super::{config::PoolConfig, stats::PoolStats};

/// Whether a checkout flips the instance active before handing it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// Mark the instance active (the usual case)
    #[default]
    Activate,
    /// Leave the instance inactive; the caller activates it later
    Skip,
}

/// A pool that recycles instances produced by an [`InstanceFactory`]
///
/// Every instance the pool created sits in exactly one of two sets: the
/// available set, served from the front, and the in-use set. The pool only
/// grows; instances are destroyed by [`dispose`](Self::dispose), by a failed
/// [`verify_healthy`](Self::verify_healthy), or when the pool is dropped.
///
/// Callers may deactivate a checked-out instance through the host without
/// releasing it. Such instances are picked up again by
/// [`reclaim`](Self::reclaim), which runs lazily whenever a checkout finds
/// the available set empty.
pub struct RecyclingPool<F: InstanceFactory> {
    /// Configuration
    config: PoolConfig,
    /// Host collaborator
    factory: F,
    /// Prototype every instance is cloned from
    template: F::Template,
    /// Context every instance is created under
    holder: F::Holder,
    /// Instances ready for checkout
    available: VecDeque<F::Instance>,
    /// Instances checked out
    in_use: Vec<F::Instance>,
    /// Statistics
    stats: PoolStats,
}

impl<F: InstanceFactory> RecyclingPool<F> {
    /// Create a pool and pre-warm it with `config.prewarm_count` instances
    pub fn new(
        factory: F,
        template: F::Template,
        holder: F::Holder,
        config: PoolConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(factory, template, holder, config))
    }

    /// Create a default-configured pool pre-warmed with `prewarm_count` instances
    pub fn with_prewarm(
        factory: F,
        template: F::Template,
        holder: F::Holder,
        prewarm_count: usize,
    ) -> Self {
        let config = PoolConfig::default().with_prewarm_count(prewarm_count);
        Self::build(factory, template, holder, config)
    }

    /// Create a pool with the default configuration
    pub fn with_defaults(factory: F, template: F::Template, holder: F::Holder) -> Self {
        Self::build(factory, template, holder, PoolConfig::default())
    }

    fn build(factory: F, template: F::Template, holder: F::Holder, config: PoolConfig) -> Self {
        let prewarm_count = config.prewarm_count;
        let mut pool = Self {
            config,
            factory,
            template,
            holder,
            available: VecDeque::with_capacity(prewarm_count),
            in_use: Vec::new(),
            stats: PoolStats::new(),
        };
        pool.pre_warm(prewarm_count);
        log::debug!("pool '{}' created with {} instances", pool.name(), prewarm_count);
        pool
    }

    /// Check out an instance and mark it active
    pub fn acquire(&mut self) -> F::Instance {
        self.acquire_with(Activation::Activate)
    }

    /// Check out an instance without activating it
    pub fn acquire_inactive(&mut self) -> F::Instance {
        self.acquire_with(Activation::Skip)
    }

    /// Check out an instance
    ///
    /// An empty available set triggers a reclaim first; only when reclaim
    /// finds nothing does the pool create `growth_count` new instances.
    pub fn acquire_with(&mut self, activation: Activation) -> F::Instance {
        let instance = loop {
            if let Some(instance) = self.available.pop_front() {
                break instance;
            }
            if self.reclaim() == 0 {
                self.grow();
            }
        };

        if activation == Activation::Activate {
            self.factory.set_active(&instance, true);
        }
        self.in_use.push(instance.clone());
        self.stats.record_acquisition();

        log::trace!("pool '{}' checked out {:?}", self.config.name, instance);
        instance
    }

    /// Return a checked-out instance to the pool
    ///
    /// Fails with [`RecyclerError::InvalidState`] when the instance is not
    /// checked out from this pool; nothing is modified in that case.
    pub fn release(&mut self, instance: F::Instance) -> Result<()> {
        let position = match self.in_use.iter().position(|used| *used == instance) {
            Some(position) => position,
            None => {
                log::warn!(
                    "pool '{}' asked to release {:?}, which is not checked out",
                    self.config.name,
                    instance
                );
                return Err(RecyclerError::invalid_state(format!(
                    "{:?} is not checked out from pool '{}'",
                    instance, self.config.name
                )));
            }
        };

        let instance = self.in_use.remove(position);
        self.factory.set_active(&instance, false);
        log::trace!("pool '{}' checked in {:?}", self.config.name, instance);
        self.available.push_back(instance);
        self.stats.record_release();
        Ok(())
    }

    /// Move checked-out instances the host has deactivated back to the available set
    ///
    /// Returns how many instances were moved.
    pub fn reclaim(&mut self) -> usize {
        let factory = &self.factory;
        let (idle, busy): (Vec<_>, Vec<_>) = self
            .in_use
            .drain(..)
            .partition(|instance| !factory.is_active(instance));
        self.in_use = busy;

        let reclaimed = idle.len();
        if reclaimed > 0 {
            self.available.extend(idle);
            self.stats.record_reclaim(reclaimed);
            log::debug!(
                "pool '{}' reclaimed {} deactivated instances",
                self.config.name,
                reclaimed
            );
        }
        reclaimed
    }

    /// Check that the holder and template are still alive
    ///
    /// When either is gone the pool tears itself down before returning
    /// `false`, so a `false` result means the pool has just been emptied.
    pub fn verify_healthy(&mut self) -> bool {
        if self.factory.is_context_alive(&self.template, &self.holder) {
            return true;
        }

        log::warn!(
            "pool '{}' lost its holder or template, disposing {} instances",
            self.config.name,
            self.len()
        );
        self.dispose();
        false
    }

    /// Destroy every instance the pool owns
    pub fn dispose(&mut self) {
        let count = self.len();
        if count == 0 {
            return;
        }

        for instance in self.in_use.drain(..).chain(self.available.drain(..)) {
            self.factory.destroy(&instance);
        }
        self.stats.record_destroyed(count);
        log::debug!("pool '{}' destroyed {} instances", self.config.name, count);
    }

    /// Create `count` inactive instances ahead of demand
    pub fn pre_warm(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let batch = self
            .factory
            .create_inactive_batch(&self.template, &self.holder, count);
        self.available.extend(batch);
        self.stats.record_created(count);
    }

    /// Get number of available instances
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Get number of checked-out instances
    pub fn in_use_count(&self) -> usize {
        self.in_use.len()
    }

    /// Total instances owned by the pool
    pub fn len(&self) -> usize {
        self.available.len() + self.in_use.len()
    }

    /// Whether the pool owns no instances
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `instance` is currently checked out
    pub fn is_in_use(&self, instance: &F::Instance) -> bool {
        self.in_use.contains(instance)
    }

    /// Whether `instance` is waiting in the available set
    pub fn is_available(&self, instance: &F::Instance) -> bool {
        self.available.contains(instance)
    }

    /// Checked-out instances in checkout order
    pub fn in_use(&self) -> &[F::Instance] {
        &self.in_use
    }

    /// Available instances in the order they will be served
    pub fn available(&self) -> impl Iterator<Item = &F::Instance> {
        self.available.iter()
    }

    /// Get current statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Clear the lifecycle counters, keeping the current pool size and checkouts
    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.stats.record_created(self.len());
        self.stats.currently_in_use = self.in_use.len();
        self.stats.peak_in_use = self.in_use.len();
    }

    /// Get pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Pool name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Prototype instances are cloned from
    pub fn template(&self) -> &F::Template {
        &self.template
    }

    /// Context instances are created under
    pub fn holder(&self) -> &F::Holder {
        &self.holder
    }

    /// Host collaborator
    pub fn factory(&self) -> &F {
        &self.factory
    }

    fn grow(&mut self) {
        let count = self.config.growth_count;
        self.pre_warm(count);
        self.stats.record_growth();
        log::debug!(
            "pool '{}' exhausted, created {} instances (size now {})",
            self.config.name,
            count,
            self.len()
        );
    }
}

impl<F: InstanceFactory> fmt::Debug for RecyclingPool<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclingPool")
            .field("name", &self.config.name)
            .field("available", &self.available)
            .field("in_use", &self.in_use)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<F: InstanceFactory> Drop for RecyclingPool<F> {
    fn drop(&mut self) {
        self.dispose();
    }
}
