use std::{collections::VecDeque, time::Instant};

use clap::{App, Arg, ArgMatches, SubCommand};
use recycler::{
    error::RecyclerError, ArenaFactory, InstanceFactory, PoolConfig, RecyclingPool, Result,
};

fn main() -> Result<()> {
    env_logger::init();

    let matches = App::new("recycler-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recycling object pool driver")
        .subcommand(
            SubCommand::with_name("scenario")
                .about("Run the reference checkout/reclaim scenarios and print pool statistics"),
        )
        .subcommand(
            SubCommand::with_name("churn")
                .about("Run acquire/release churn against an in-process arena")
                .arg(
                    Arg::with_name("prewarm")
                        .short("p")
                        .long("prewarm")
                        .value_name("COUNT")
                        .help("Instances created up front")
                        .default_value("5")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("cycles")
                        .short("c")
                        .long("cycles")
                        .value_name("COUNT")
                        .help("Number of checkouts")
                        .default_value("10000")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("hold")
                        .long("hold")
                        .value_name("COUNT")
                        .help("Instances kept checked out at any time")
                        .default_value("8")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("bypass_every")
                        .short("b")
                        .long("bypass-every")
                        .value_name("K")
                        .help("Deactivate every K-th instance instead of releasing it (0 = never)")
                        .default_value("0")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("config")
                        .long("config")
                        .value_name("FILE")
                        .help("JSON pool configuration; overrides --prewarm")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("config")
                .about("Validate or create a JSON pool configuration")
                .arg(
                    Arg::with_name("file")
                        .short("f")
                        .long("file")
                        .value_name("FILE")
                        .help("Configuration file")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("init")
                        .long("init")
                        .help("Write the default configuration to FILE"),
                ),
        )
        .subcommand(SubCommand::with_name("info").about("Show version information"))
        .get_matches();

    match matches.subcommand() {
        ("scenario", Some(_)) => run_scenarios(),
        ("churn", Some(churn_matches)) => run_churn(churn_matches),
        ("config", Some(config_matches)) => handle_config(config_matches),
        ("info", Some(_)) => show_info(),
        _ => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn parse_count(matches: &ArgMatches, name: &str) -> Result<usize> {
    matches
        .value_of(name)
        .ok_or_else(|| RecyclerError::invalid_parameter(name, "Missing value"))?
        .parse()
        .map_err(|_| RecyclerError::invalid_parameter(name, "Invalid count"))
}

fn run_scenarios() -> Result<()> {
    let factory = ArenaFactory::new();
    let template = factory.register_template("scenario");
    let holder = factory.register_holder();

    println!("Scenario A: growth on exhaustion");
    let mut pool = RecyclingPool::new(
        factory.clone(),
        template,
        holder,
        PoolConfig::new("scenario-a").with_prewarm_count(2),
    )?;
    println!(
        "  after prewarm:   available={} in_use={}",
        pool.available_count(),
        pool.in_use_count()
    );
    let first = pool.acquire();
    pool.acquire();
    println!(
        "  after 2 acquire: available={} in_use={}",
        pool.available_count(),
        pool.in_use_count()
    );
    pool.acquire();
    println!(
        "  after 3 acquire: available={} in_use={}",
        pool.available_count(),
        pool.in_use_count()
    );
    pool.release(first)?;
    println!(
        "  after release:   available={} in_use={}",
        pool.available_count(),
        pool.in_use_count()
    );
    println!("  {}", pool.stats().summary());
    drop(pool);

    println!("\nScenario B: reclaim of a bypassed instance");
    let mut pool = RecyclingPool::new(
        factory.clone(),
        template,
        holder,
        PoolConfig::new("scenario-b").with_prewarm_count(1),
    )?;
    let bypassed = pool.acquire();
    factory.deactivate(bypassed);
    let created_before = factory.created_count();
    let reissued = pool.acquire();
    println!(
        "  reissued {} (same instance: {}, new instances created: {})",
        reissued,
        reissued == bypassed,
        factory.created_count() - created_before
    );
    println!("  {}", pool.stats().summary());

    Ok(())
}

fn run_churn(matches: &ArgMatches) -> Result<()> {
    let cycles = parse_count(matches, "cycles")?;
    let hold = parse_count(matches, "hold")?;
    let bypass_every = parse_count(matches, "bypass_every")?;
    let config = match matches.value_of("config") {
        Some(path) => PoolConfig::from_json_file(path)?,
        None => PoolConfig::new("churn").with_prewarm_count(parse_count(matches, "prewarm")?),
    };

    let factory = ArenaFactory::new();
    let template = factory.register_template(config.name.clone());
    let holder = factory.register_holder();
    let mut pool = RecyclingPool::new(factory.clone(), template, holder, config)?;

    println!("Churning pool '{}'", pool.name());
    println!("  Cycles: {}", cycles);
    println!("  Held at once: {}", hold);
    println!("  Bypass every: {}", bypass_every);

    let start = Instant::now();
    let mut held = VecDeque::with_capacity(hold + 1);
    let mut returned = 0usize;

    for _ in 0..cycles {
        held.push_back(pool.acquire());
        if held.len() <= hold {
            continue;
        }
        if let Some(instance) = held.pop_front() {
            returned += 1;
            if bypass_every > 0 && returned % bypass_every == 0 {
                factory.set_active(&instance, false);
            } else {
                pool.release(instance)?;
            }
        }
    }

    let elapsed = start.elapsed();
    let ops_per_sec = cycles as f64 / elapsed.as_secs_f64().max(f64::EPSILON);

    println!("\nResults:");
    println!("  Total time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    println!("  Checkouts/sec: {:.0}", ops_per_sec);
    println!("  Pool size: {}", pool.len());
    println!("  Host instances created: {}", factory.created_count());
    println!("  {}", pool.stats().summary());
    Ok(())
}

fn handle_config(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .value_of("file")
        .ok_or_else(|| RecyclerError::invalid_parameter("file", "Missing value"))?;

    if matches.is_present("init") {
        PoolConfig::default().save_json_file(path)?;
        println!("Wrote default configuration to {}", path);
        return Ok(());
    }

    let config = PoolConfig::from_json_file(path)?;
    println!("Configuration '{}' is valid:", config.name);
    println!("  prewarm_count: {}", config.prewarm_count);
    println!("  growth_count:  {}", config.growth_count);
    Ok(())
}

fn show_info() -> Result<()> {
    println!("recycler {}", recycler::VERSION);
    println!("  default prewarm: {}", recycler::pool::DEFAULT_PREWARM_COUNT);
    println!("  default growth:  {}", recycler::pool::DEFAULT_GROWTH_COUNT);
    Ok(())
}
