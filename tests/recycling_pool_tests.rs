//! Tests for the recycling pool lifecycle

use recycler::{
    ArenaFactory, HolderId, InstanceFactory, PoolConfig, RecyclerError, RecyclingPool, TemplateId,
};

fn create_test_pool(
    prewarm: usize,
) -> (
    ArenaFactory,
    RecyclingPool<ArenaFactory>,
    TemplateId,
    HolderId,
) {
    let factory = ArenaFactory::new();
    let template = factory.register_template("test_effect");
    let holder = factory.register_holder();
    let config = PoolConfig::new("test_pool").with_prewarm_count(prewarm);
    let pool = RecyclingPool::new(factory.clone(), template, holder, config)
        .expect("Failed to create pool");
    (factory, pool, template, holder)
}

#[test]
fn test_growth_then_release_scenario() {
    let (factory, mut pool, _, _) = create_test_pool(2);
    assert_eq!(pool.available_count(), 2);
    assert_eq!(pool.in_use_count(), 0);

    let first = pool.acquire();
    let second = pool.acquire();
    assert_eq!(pool.in_use_count(), 2);
    assert_eq!(pool.available_count(), 0);

    let third = pool.acquire();
    assert_eq!(pool.in_use_count(), 3);
    assert_eq!(pool.available_count(), 0);
    assert_eq!(factory.created_count(), 3);
    assert_ne!(third, first);
    assert_ne!(third, second);

    pool.release(second).unwrap();
    assert_eq!(pool.in_use_count(), 2);
    assert_eq!(pool.available_count(), 1);
}

#[test]
fn test_bypassed_instance_is_reissued() {
    let (factory, mut pool, _, _) = create_test_pool(2);
    let first = pool.acquire();
    let second = pool.acquire();
    assert_eq!(pool.available_count(), 0);

    // Host deactivates the instance without going through the pool
    factory.deactivate(second);

    let reissued = pool.acquire();
    assert_eq!(reissued, second);
    assert!(factory.is_active(&reissued));
    assert_eq!(factory.created_count(), 2);
    assert_eq!(pool.in_use(), &[first, second]);
    assert_eq!(pool.available_count(), 0);
    assert_eq!(pool.stats().reclaimed, 1);
    assert_eq!(pool.stats().growth_events, 0);
}

#[test]
fn test_reclaim_not_attempted_while_available() {
    let (factory, mut pool, _, _) = create_test_pool(2);
    let first = pool.acquire();
    factory.deactivate(first);

    let second = pool.acquire();
    assert_ne!(second, first);
    assert!(pool.is_in_use(&first));
    assert_eq!(pool.stats().reclaimed, 0);
}

#[test]
fn test_inactive_checkout_is_reclaimable() {
    let (factory, mut pool, _, _) = create_test_pool(1);
    let dormant = pool.acquire_inactive();
    assert!(!factory.is_active(&dormant));

    // Never activated, so the next exhausted checkout hands it out again
    let again = pool.acquire();
    assert_eq!(again, dormant);
    assert_eq!(pool.len(), 1);
}

#[test]
fn test_release_of_foreign_instance_fails_without_side_effects() {
    let (factory, mut pool, template, holder) = create_test_pool(2);
    let held = pool.acquire();
    let foreign = factory.create(&template, &holder);

    let err = pool.release(foreign).unwrap_err();
    assert!(matches!(err, RecyclerError::InvalidState { .. }));
    assert!(err.is_contract_violation());
    assert_eq!(pool.in_use(), &[held]);
    assert_eq!(pool.available_count(), 1);
    assert!(factory.is_active(&foreign));
}

#[test]
fn test_release_of_reclaimed_instance_fails() {
    let (factory, mut pool, _, _) = create_test_pool(1);
    let instance = pool.acquire();
    factory.deactivate(instance);
    assert_eq!(pool.reclaim(), 1);

    let err = pool.release(instance).unwrap_err();
    assert!(matches!(err, RecyclerError::InvalidState { .. }));
    assert_eq!(pool.available_count(), 1);
}

#[test]
fn test_release_between_pools_is_rejected() {
    let factory = ArenaFactory::new();
    let template = factory.register_template("shared_template");
    let holder = factory.register_holder();
    let mut left = RecyclingPool::with_prewarm(factory.clone(), template, holder, 1);
    let mut right = RecyclingPool::with_prewarm(factory.clone(), template, holder, 1);

    let from_left = left.acquire();
    assert!(right.release(from_left).is_err());
    assert!(left.release(from_left).is_ok());
}

#[test]
fn test_dispose_empties_and_is_idempotent() {
    let (factory, mut pool, _, _) = create_test_pool(3);
    pool.acquire();
    pool.acquire();

    pool.dispose();
    assert_eq!(pool.available_count(), 0);
    assert_eq!(pool.in_use_count(), 0);
    assert_eq!(factory.live_instances(), 0);
    assert_eq!(factory.destroyed_count(), 3);

    pool.dispose();
    assert!(pool.is_empty());
    assert_eq!(factory.destroyed_count(), 3);
    assert_eq!(pool.stats().teardowns, 1);
}

#[test]
fn test_pre_warm_on_empty_pool() {
    let (_, mut pool, _, _) = create_test_pool(0);
    assert!(pool.is_empty());

    pool.pre_warm(4);
    assert_eq!(pool.available_count(), 4);
    assert_eq!(pool.in_use_count(), 0);
}

#[test]
fn test_pre_warm_after_depletion() {
    let (_, mut pool, _, _) = create_test_pool(1);
    pool.acquire();
    pool.pre_warm(2);
    assert_eq!(pool.available_count(), 2);
    assert_eq!(pool.in_use_count(), 1);
    assert_eq!(pool.stats().growth_events, 0);
}

#[test]
fn test_verify_healthy_with_live_context() {
    let (factory, mut pool, _, _) = create_test_pool(2);
    pool.acquire();
    assert!(pool.verify_healthy());
    assert_eq!(pool.len(), 2);
    assert_eq!(factory.live_instances(), 2);
}

#[test]
fn test_verify_healthy_after_holder_destroyed() {
    let (factory, mut pool, _, holder) = create_test_pool(3);
    let held = pool.acquire();

    factory.destroy_holder(holder);
    assert!(!factory.exists(held));

    assert!(!pool.verify_healthy());
    assert!(pool.is_empty());
    assert_eq!(factory.live_instances(), 0);
    // Instances already went down with the holder; teardown must not double count
    assert_eq!(factory.destroyed_count(), 3);
}

#[test]
fn test_verify_healthy_after_template_destroyed() {
    let (factory, mut pool, template, _) = create_test_pool(2);
    pool.acquire();
    factory.destroy_template(template);

    assert!(!pool.verify_healthy());
    assert!(pool.is_empty());
    assert_eq!(factory.live_instances(), 0);
    assert!(!pool.verify_healthy());
}

#[test]
fn test_drop_destroys_everything() {
    let (factory, mut pool, _, _) = create_test_pool(2);
    pool.acquire();
    pool.acquire();
    pool.acquire();
    drop(pool);
    assert_eq!(factory.live_instances(), 0);
    assert_eq!(factory.destroyed_count(), 3);
}

#[test]
fn test_instances_come_from_template() {
    let (factory, mut pool, template, holder) = create_test_pool(2);
    pool.acquire();
    pool.acquire();
    pool.acquire();

    let owned = factory.instances_of(template);
    assert_eq!(owned.len(), pool.len());
    for id in owned {
        let record = factory.record(id).unwrap();
        assert_eq!(record.template, template);
        assert_eq!(record.holder, holder);
    }
}

#[test]
fn test_stats_track_lifecycle() {
    let (factory, mut pool, _, _) = create_test_pool(1);
    let a = pool.acquire();
    let b = pool.acquire();
    factory.deactivate(b);
    pool.release(a).unwrap();
    pool.acquire();

    let stats = pool.stats();
    assert_eq!(stats.total_created, 2);
    assert_eq!(stats.acquisitions, 3);
    assert_eq!(stats.releases, 1);
    assert_eq!(stats.growth_events, 1);
    assert_eq!(stats.peak_in_use, 2);
    assert_eq!(stats.currently_in_use, pool.in_use_count());
}
