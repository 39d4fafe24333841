// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Superoperator evolution CLI
//!
//! Samples random control pulses, evolves them through both numeric paths and
//! reports how far apart the resulting superoperators are.
//!
//! # Usage
//!
//! ```bash
//! # Run the default experiment (index from config)
//! superop-sim simulate
//!
//! # Pick an experiment from the sweep tables
//! superop-sim simulate --index 204 --seed 7
//!
//! # Explicit model and parameters
//! superop-sim simulate --model left-mixing --params 0.2,0.6 --json
//!
//! # List the experiment table
//! superop-sim sweep --model spin-chain-mixing
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use superop_sim::config::{Config, LoggingConfig};
use superop_sim::evolution::{fidelity_error, integrate, NumericMode};
use superop_sim::models::{select_model, NoiseModel, HILBERT_DIM};
use superop_sim::sampling::{make_rng, random_pulses};
use superop_sim::sweep::{experiments, Experiment};
use superop_sim::{Error, Result, VERSION};

/// Superoperator evolution engine for two-qubit open systems
#[derive(Parser)]
#[command(name = "superop-sim")]
#[command(author = "QubitOS Contributors")]
#[command(version = VERSION)]
#[command(about = "Compare exact and differentiable superoperator evolution")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve one random pulse sequence in both numeric modes
    Simulate {
        /// Experiment index from the sweep tables
        #[arg(short, long, conflicts_with = "model")]
        index: Option<usize>,

        /// Model name (canonical id or alias)
        #[arg(short, long, requires = "params")]
        model: Option<String>,

        /// Comma-separated parameters: alpha,gamma[,beta]
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        params: Option<Vec<f64>>,

        /// RNG seed for the pulse sequence
        #[arg(short, long, env = "SUPEROP_SEED")]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List experiments of the sweep tables
    Sweep {
        /// Restrict to one model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show effective configuration
    Config,

    /// Validate configuration file
    Validate,
}

/// Result of one `simulate` run.
#[derive(Debug, Serialize)]
struct SimulationReport {
    model: NoiseModel,
    params: Vec<f64>,
    n_ts: usize,
    evo_time: f64,
    expm_order: usize,
    fidelity_error: f64,
    accept_err: f64,
    within_tolerance: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging);

    match cli.command {
        Commands::Simulate {
            index,
            model,
            params,
            seed,
            json,
        } => {
            if let Some(seed) = seed {
                config.sampling.seed = Some(seed);
            }
            config.validate()?;

            let (model, params) = match (model, params) {
                (Some(name), Some(params)) => (select_model(&name)?, params),
                (None, Some(_)) => {
                    return Err(Error::Config("--params requires --model".into()));
                }
                _ => {
                    let experiment =
                        Experiment::from_index(index.unwrap_or(config.experiment.index))?;
                    (experiment.model, experiment.params())
                }
            };

            let report = simulate(&config, model, params)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("model:          {}", report.model);
                println!("params:         {:?}", report.params);
                println!("fidelity error: {:.6e}", report.fidelity_error);
                println!(
                    "within {}:     {}",
                    report.accept_err,
                    if report.within_tolerance { "yes" } else { "no" }
                );
            }
            if !report.within_tolerance {
                std::process::exit(1);
            }
        }

        Commands::Sweep { model } => {
            let models = match model {
                Some(name) => vec![select_model(&name)?],
                None => NoiseModel::ALL.to_vec(),
            };
            for model in models {
                println!("{} ({}):", model, model.id());
                for e in experiments(model) {
                    println!("  {:>4}  {:?}", e.index, e.params());
                }
            }
        }

        Commands::Config => {
            // Show effective configuration
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Validate => {
            // Validate configuration
            match config.validate() {
                Ok(()) => {
                    println!("Configuration is valid");
                }
                Err(e) => {
                    eprintln!("Configuration error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Evolve one random pulse sequence in both modes and score the pair.
fn simulate(config: &Config, model: NoiseModel, params: Vec<f64>) -> Result<SimulationReport> {
    let evo = &config.evolution;
    let mut rng = make_rng(config.sampling.seed);
    let pulses = random_pulses(
        &mut rng,
        evo.n_ts,
        model.num_controls(),
        config.sampling.max_amplitude,
    );

    info!(
        version = VERSION,
        model = model.alias(),
        params = ?params,
        n_ts = evo.n_ts,
        evo_time = evo.evo_time,
        seed = ?config.sampling.seed,
        "Starting simulation"
    );

    let exact = integrate(
        &pulses,
        &params,
        evo.n_ts,
        evo.evo_time,
        model,
        NumericMode::Exact,
    )?;
    let mode = evo.differentiable_mode();
    let approx = integrate(&pulses, &params, evo.n_ts, evo.evo_time, model, mode)?;
    let err = fidelity_error(&exact, &approx, HILBERT_DIM, mode)?;

    let within_tolerance = err <= config.experiment.accept_err;
    if within_tolerance {
        info!(fidelity_error = err, "Modes agree");
    } else {
        warn!(
            fidelity_error = err,
            accept_err = config.experiment.accept_err,
            "Modes disagree beyond tolerance"
        );
    }

    Ok(SimulationReport {
        model,
        params,
        n_ts: evo.n_ts,
        evo_time: evo.evo_time,
        expm_order: evo.expm_order,
        fidelity_error: err,
        accept_err: config.experiment.accept_err,
        within_tolerance,
    })
}

/// Initialize logging with tracing.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
