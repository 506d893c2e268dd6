//! # OREDROPS Drop Simulator
//!
//! Breaks one block type many times against a configuration file and
//! prints what actually dropped, next to what each method predicts.
//!
//! ```bash
//! drop_simulator config/oredrops.toml diamond_ore 3
//! drop_simulator config/oredrops.toml diamond_ore 3 1000000 42
//! RUST_LOG=warn drop_simulator config/oredrops.toml stone 0 10
//! ```

use std::collections::BTreeMap;
use std::process::ExitCode;

use oredrops::{ConfigSource, DropService, FileSource, ItemCatalog};
use oredrops_core::{rng, DropRng, MethodComparison};
use oredrops_loot::{DebugFlag, Diagnostics, ItemId, LoadError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: drop_simulator <config.toml> <material> <level> [trials] [seed]";
const DEFAULT_TRIALS: u64 = 100_000;

#[derive(Error, Debug)]
enum SimulatorError {
    #[error("{}", USAGE)]
    Usage,

    #[error("invalid {name} '{value}'")]
    InvalidArgument { name: &'static str, value: String },

    #[error(transparent)]
    Load(#[from] LoadError),
}

struct Args {
    config: String,
    material: String,
    level: u32,
    trials: u64,
    seed: Option<u64>,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> Result<Self, SimulatorError> {
        let config = raw.next().ok_or(SimulatorError::Usage)?;
        let material = raw.next().ok_or(SimulatorError::Usage)?;
        let level = number("level", raw.next().ok_or(SimulatorError::Usage)?)?;
        let trials = raw.next().map(|v| number("trials", v)).transpose()?.unwrap_or(DEFAULT_TRIALS);
        let seed = raw.next().map(|v| number("seed", v)).transpose()?;
        if raw.next().is_some() || trials == 0 {
            return Err(SimulatorError::Usage);
        }
        Ok(Self {
            config,
            material,
            level,
            trials,
            seed,
        })
    }
}

fn number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, SimulatorError> {
    value
        .parse()
        .map_err(|_| SimulatorError::InvalidArgument { name, value })
}

/// Every configured id exists; building yields the id.
struct AnyItem;

impl ItemCatalog for AnyItem {
    type Item = ItemId;

    fn exists(&self, _id: &str) -> bool {
        true
    }

    fn build(&self, id: &str) -> Option<ItemId> {
        Some(ItemId::from(id))
    }
}

#[derive(Default)]
struct Tally {
    hits: u64,
    quantity: u64,
}

fn simulate<R: DropRng>(service: &DropService<AnyItem>, args: &Args, rng: &mut R) -> BTreeMap<ItemId, Tally> {
    let mut tallies: BTreeMap<ItemId, Tally> = BTreeMap::new();
    for _ in 0..args.trials {
        for drop in service.get_drops_with(&args.material, args.level, rng) {
            let tally = tallies.entry(drop.item).or_default();
            tally.hits += 1;
            tally.quantity += u64::from(drop.quantity);
        }
    }
    tallies
}

fn run(args: &Args) -> Result<(), SimulatorError> {
    let source = FileSource::new(&args.config);
    let service = DropService::new(AnyItem, Diagnostics::new(DebugFlag::default()));
    let summary = service.reload_with(&source, |settings| {
        service.diagnostics().flag().set(settings.debug_mode);
    })?;

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    OREDROPS DROP SIMULATOR");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Config:   {} ({})", source.describe(), summary);
    println!("  Block:    {}", args.material);
    println!("  Fortune:  {}", args.level);
    println!("  Method:   {}", service.method().label());
    println!("  Trials:   {}", args.trials);
    if let Some(seed) = args.seed {
        println!("  Seed:     {seed}");
    }
    println!();

    let snapshot = service.snapshot();
    let entries = snapshot.entries(&args.material);
    if entries.is_empty() {
        println!("  No drops configured for {}.", args.material);
        return Ok(());
    }

    let tallies = match args.seed {
        Some(seed) => simulate(&service, args, &mut rng::seeded(seed)),
        None => simulate(&service, args, &mut rand::thread_rng()),
    };

    #[allow(clippy::cast_precision_loss)]
    let trials = args.trials as f64;
    println!("  {:<24} {:>10} {:>12}", "item", "hit rate", "mean qty");
    for entry in entries {
        let tally = tallies.get(entry.item_id());
        let (hits, quantity) = tally.map_or((0, 0), |t| (t.hits, t.quantity));
        #[allow(clippy::cast_precision_loss)]
        let (rate, mean) = (hits as f64 / trials * 100.0, quantity as f64 / trials);
        println!("  {:<24} {:>9.3}% {:>12.4}", entry.item_id().as_str(), rate, mean);
    }
    println!();

    for entry in entries {
        println!("  {}", entry.item_id());
        for line in MethodComparison::new(entry.chance(), args.level).to_string().lines() {
            println!("    {line}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let result = Args::parse(std::env::args().skip(1)).and_then(|args| run(&args));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
