//! Basic usage example of the Recycler pool

use recycler::{ArenaFactory, InstanceFactory, PoolConfigBuilder, RecyclingPool, Result};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    println!("Recycler Pool Example");
    println!("=====================");

    // The arena stands in for a game engine's object model
    let factory = ArenaFactory::new();
    let template = factory.register_template("hit_spark");
    let holder = factory.register_holder();

    let config = PoolConfigBuilder::new("hit_sparks")
        .prewarm_count(3)
        .build()?;

    println!("\nCreating pool: {}", config.name);
    let mut pool = RecyclingPool::new(factory.clone(), template, holder, config)?;
    println!("  Available instances: {}", pool.available_count());

    println!("\nChecking out instances...");
    let sparks: Vec<_> = (0..3).map(|_| pool.acquire()).collect();
    for spark in &sparks {
        println!("  {} active: {}", spark, factory.is_active(spark));
    }

    println!("\nReturning the first spark, losing track of the second...");
    pool.release(sparks[0])?;
    factory.deactivate(sparks[1]);

    let next = pool.acquire();
    let after = pool.acquire();
    println!("  next checkout reused {}", next);
    println!("  following checkout reclaimed {}", after);
    println!("  instances created so far: {}", factory.created_count());

    println!("\nStatistics:");
    println!("  {}", pool.stats().summary());

    println!("\nDestroying the holder...");
    factory.destroy_holder(holder);
    println!("  pool healthy: {}", pool.verify_healthy());
    println!("  pool size after check: {}", pool.len());

    Ok(())
}
