//! jetprep CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use jp_calib::{CalibrationStore, ResolutionTable};
use jp_enrich::{AnnotatedEvent, EnricherConfig, EventUnit, JetEnricher, MenuService};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jetprep")]
#[command(about = "jetprep - per-jet trigger, smearing and calibration annotations")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate every jet of every processing unit
    Enrich {
        /// Input processing units (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Trigger menu assignments by run range (JSON)
        #[arg(long)]
        menus: PathBuf,

        /// Calibration records (JSON)
        #[arg(long)]
        calib: PathBuf,

        /// Label of the jet collection to annotate
        #[arg(long, default_value = "slimmedJets")]
        jet_collection: String,

        /// Label of the trigger-results record
        #[arg(long, default_value = "TriggerResults")]
        trigger_results: String,

        /// Label of the trigger summary
        #[arg(long, default_value = "hltTriggerSummaryAOD")]
        trigger_summary: String,

        /// Substring selecting the trigger filters to take legs from
        #[arg(long)]
        trigger_filter: String,

        /// Substring selecting the trigger path
        #[arg(long)]
        trigger_path: String,

        /// Maximum angular distance for trigger association
        #[arg(long)]
        max_delta_r: f64,

        /// Name of the JEC correction set
        #[arg(long)]
        jec_set: String,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Threads (0 = auto). Units are enriched in parallel.
        #[arg(long, default_value = "1")]
        threads: usize,
    },

    /// Print the JER scale factors at one pseudorapidity
    Jer {
        /// Pseudorapidity to look up
        #[arg(long)]
        eta: f64,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Enrich {
            input,
            menus,
            calib,
            jet_collection,
            trigger_results,
            trigger_summary,
            trigger_filter,
            trigger_path,
            max_delta_r,
            jec_set,
            output,
            threads,
        } => {
            let config = EnricherConfig {
                jet_collection,
                trigger_results,
                trigger_summary,
                trigger_filter,
                trigger_path,
                max_delta_r,
                jec_set,
            };
            cmd_enrich(&input, &menus, &calib, config, output.as_ref(), threads)
        }
        Commands::Jer { eta } => cmd_jer(eta),
        Commands::Version => {
            println!("jetprep {}", jp_core::VERSION);
            Ok(())
        }
    }
}

/// Output record for one successfully enriched unit.
#[derive(Debug, Serialize)]
struct UnitOutput {
    run: u64,
    events: Vec<AnnotatedEvent>,
}

fn cmd_enrich(
    input: &PathBuf,
    menus: &PathBuf,
    calib: &PathBuf,
    config: EnricherConfig,
    output: Option<&PathBuf>,
    threads: usize,
) -> Result<()> {
    if threads > 0 {
        // Best-effort; if a global pool already exists, keep going.
        let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
    }

    tracing::info!(path = %input.display(), "loading processing units");
    let text = std::fs::read_to_string(input)?;
    let units: Vec<EventUnit> = serde_json::from_str(&text)?;
    tracing::info!(n_units = units.len(), "units loaded");

    let menus = MenuService::load(menus)?;
    let store = CalibrationStore::load(calib)?;
    let enricher = JetEnricher::new(config, ResolutionTable::run2())?;

    // Units share only read-only calibration data; enrich them in parallel,
    // each with its own path-resolution cache, preserving unit order.
    let results: Vec<Option<UnitOutput>> = units
        .par_iter()
        .map(|unit| {
            let menu = match menus.menu_for_run(unit.run) {
                Ok(menu) => menu,
                Err(e) => {
                    tracing::error!(run = unit.run, error = %e, "skipping unit");
                    return None;
                }
            };
            let mut enricher = enricher.clone();
            match enricher.process_unit(unit, menu, &store) {
                Ok(events) => Some(UnitOutput { run: unit.run, events }),
                Err(e) => {
                    tracing::error!(run = unit.run, error = %e, "skipping unit");
                    None
                }
            }
        })
        .collect();

    let enriched: Vec<UnitOutput> = results.into_iter().flatten().collect();
    tracing::info!(n_enriched = enriched.len(), "enrichment complete");

    write_json(output, serde_json::to_value(&enriched)?)
}

fn cmd_jer(eta: f64) -> Result<()> {
    use jp_enrich::annotation::UNAVAILABLE_SENTINEL;

    let table = ResolutionTable::run2();
    let (jer, up, down) = match table.lookup(eta) {
        Some(r) => (r.nominal, r.up, r.down),
        None => (UNAVAILABLE_SENTINEL, UNAVAILABLE_SENTINEL, UNAVAILABLE_SENTINEL),
    };
    let output_json = serde_json::json!({
        "eta": eta,
        "JER": jer,
        "JERup": up,
        "JERdown": down,
    });
    println!("{}", serde_json::to_string_pretty(&output_json)?);
    Ok(())
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
