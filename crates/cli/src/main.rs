//! Stowage CLI

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use stowage::core::{parse_date, Allocator, AllocatorConfig, OrientationPolicy, DEFAULT_GRID_STEP};
use stowage::lifecycle::{classify_waste, SimulationConfig, TimeSimulator, UsageMode};
use stowage::packing::{DimensionScorer, PriorityAllocator};
use stowage_cli::{
    arrangement_csv, locate, InventoryParser, PlacementOutput, Query, SearchOutput,
    SimulationOutput, WasteOutput,
};

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Container placement, waste tracking and usage simulation")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place items into containers
    Place {
        /// Inventory JSON file
        input: PathBuf,

        /// Placement output of an earlier run whose items are already stowed
        #[arg(long)]
        stowed: Option<PathBuf>,

        /// Grid step of the position search
        #[arg(long, default_value_t = DEFAULT_GRID_STEP)]
        grid_step: f64,

        /// Allowed item rotations
        #[arg(long, value_enum, default_value = "any")]
        orientation: OrientationArg,

        /// Wall-clock budget in milliseconds (0 = unlimited)
        #[arg(short, long, default_value = "0")]
        time_limit: u64,

        /// Search candidate containers in parallel
        #[arg(long)]
        parallel: bool,

        /// Lower-priority items one blocked item may displace (0 = never rearrange)
        #[arg(long, default_value = "0")]
        max_displaced: usize,

        /// Skip containers too small for an item before searching them
        #[arg(long)]
        prefilter: bool,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for the arrangement (CSV)
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List items expiring before a cutoff date
    Waste {
        /// Inventory JSON file
        input: PathBuf,

        /// Cutoff date, YYYY-MM-DD (default: today)
        #[arg(short, long, value_parser = parse_date_arg)]
        cutoff: Option<NaiveDate>,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Advance the calendar, applying item usage
    Simulate {
        /// Inventory JSON file
        input: PathBuf,

        /// Number of days to advance
        #[arg(short = 'n', long, default_value = "1")]
        days: u32,

        /// Usage entry ITEM_ID=QUANTITY (repeatable)
        #[arg(long = "use", value_parser = parse_usage_arg)]
        usage: Vec<(String, i64)>,

        /// JSON file mapping item IDs to quantities
        #[arg(long)]
        usage_file: Option<PathBuf>,

        /// Simulated date to start from, YYYY-MM-DD
        #[arg(long, value_parser = parse_date_arg)]
        start_date: Option<NaiveDate>,

        /// Deduct usage once per simulated day instead of once per run
        #[arg(long)]
        per_day: bool,

        /// Write the inventory with updated usage limits to this file
        #[arg(long)]
        save_inventory: Option<PathBuf>,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a placement result as CSV
    Export {
        /// Placement output JSON file
        placements: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Locate an item and plan its retrieval
    Search {
        /// Inventory JSON file
        input: PathBuf,

        /// Placement output JSON file
        placements: PathBuf,

        /// Item ID to look for
        #[arg(long)]
        id: Option<String>,

        /// Item name to look for
        #[arg(long)]
        name: Option<String>,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    /// All six axis permutations
    Any,
    /// Keep height vertical, allow turning
    Upright,
    /// Input orientation only
    Fixed,
}

impl From<OrientationArg> for OrientationPolicy {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Any => OrientationPolicy::Any,
            OrientationArg::Upright => OrientationPolicy::Upright,
            OrientationArg::Fixed => OrientationPolicy::Fixed,
        }
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

fn parse_usage_arg(value: &str) -> Result<(String, i64), String> {
    let (id, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ITEM_ID=QUANTITY, got '{}'", value))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|e| format!("invalid quantity in '{}': {}", value, e))?;
    Ok((id.trim().to_string(), quantity))
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn write_output(output: Option<&Path>, body: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Results saved to: {}", path.display());
        }
        None => println!("{}", body),
    }
    Ok(())
}

fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> anyhow::Result<()> {
    write_output(output, &serde_json::to_string_pretty(value)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let parser = InventoryParser::new();

    match cli.command {
        Commands::Place {
            input,
            stowed,
            grid_step,
            orientation,
            time_limit,
            parallel,
            max_displaced,
            prefilter,
            output,
            csv,
        } => {
            let inventory = parser
                .parse_file(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let stowed = match stowed {
                Some(path) => parser
                    .parse_placements_file(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => Vec::new(),
            };

            let config = AllocatorConfig::new()
                .with_grid_step(grid_step)
                .with_orientation(orientation.into())
                .with_time_limit(time_limit)
                .with_parallel_scan(parallel)
                .with_max_displaced(max_displaced);
            let mut allocator = PriorityAllocator::new(config);
            if prefilter {
                allocator = allocator.with_scorer(DimensionScorer);
            }

            let result = if stowed.is_empty() {
                allocator.allocate(&inventory.items, &inventory.containers)?
            } else {
                allocator.allocate_onto(&inventory.items, &inventory.containers, &stowed)?
            };

            write_json(output.as_deref(), &PlacementOutput::from(&result))?;
            if let Some(path) = csv {
                std::fs::write(&path, arrangement_csv(&result.placements))
                    .with_context(|| format!("writing {}", path.display()))?;
                log::info!("CSV saved to: {}", path.display());
            }
        }

        Commands::Waste {
            input,
            cutoff,
            output,
        } => {
            let inventory = parser
                .parse_file(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let cutoff = cutoff.unwrap_or_else(|| chrono::Local::now().date_naive());

            let report = classify_waste(&inventory.items, cutoff);
            write_json(output.as_deref(), &WasteOutput::from(&report))?;
        }

        Commands::Simulate {
            input,
            days,
            usage,
            usage_file,
            start_date,
            per_day,
            save_inventory,
            output,
        } => {
            let mut inventory = parser
                .parse_file(&input)
                .with_context(|| format!("loading {}", input.display()))?;

            let mut daily_usage: HashMap<String, i64> = match usage_file {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    parser.parse_usage(&content)?
                }
                None => HashMap::new(),
            };
            daily_usage.extend(usage);

            let mut config = SimulationConfig::new();
            if let Some(date) = start_date {
                config = config.with_start_date(date);
            }
            if per_day {
                config = config.with_usage_mode(UsageMode::PerDay);
            }

            let mut simulator = TimeSimulator::new(config);
            let report = simulator.advance(&mut inventory.items, days, &daily_usage)?;
            write_json(output.as_deref(), &SimulationOutput::from(&report))?;

            if let Some(path) = save_inventory {
                std::fs::write(&path, serde_json::to_string_pretty(&inventory)?)
                    .with_context(|| format!("writing {}", path.display()))?;
                log::info!("Inventory saved to: {}", path.display());
            }
        }

        Commands::Export { placements, output } => {
            let placements = parser
                .parse_placements_file(&placements)
                .with_context(|| format!("loading {}", placements.display()))?;
            let csv = arrangement_csv(&placements);
            write_output(output.as_deref(), csv.trim_end())?;
        }

        Commands::Search {
            input,
            placements,
            id,
            name,
            output,
        } => {
            let query = Query {
                item_id: id.as_deref(),
                item_name: name.as_deref(),
            };
            if query.is_empty() {
                bail!("search needs --id or --name");
            }

            let inventory = parser
                .parse_file(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let placements = parser
                .parse_placements_file(&placements)
                .with_context(|| format!("loading {}", placements.display()))?;

            let hit = locate(&inventory, &placements, query);
            write_json(output.as_deref(), &SearchOutput::from(hit.as_ref()))?;
        }
    }

    Ok(())
}
