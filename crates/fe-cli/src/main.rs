mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fe_core::config::Config;
use fe_core::plan::PlanTier;

/// FlowEnergy CLI -- browse the analytics catalogue and its plan gating.
#[derive(Parser)]
#[command(name = "flowenergy", version, about)]
struct Cli {
    /// Read configuration from this file instead of ~/.flowenergy/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the chart catalogue with lock state (default when no subcommand is given).
    Charts {
        /// Plan tier to evaluate against (free, pro, enterprise).
        #[arg(long)]
        plan: Option<PlanTier>,
    },

    /// Print one chart's dataset.
    Chart {
        /// Chart id, e.g. `consumption` or `pareto`.
        id: String,
        #[arg(long)]
        plan: Option<PlanTier>,
        /// Emit JSON records instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Evaluate the entitlement gate for an arbitrary feature name.
    Gate {
        feature: String,
        /// Evaluate as a premium user.
        #[arg(long)]
        premium: bool,
        /// Custom prompt text shown when gated.
        #[arg(long)]
        description: Option<String>,
    },

    /// Show per-plan limits and features.
    Plans,

    /// Build a report module selection and count its pages.
    Reports {
        #[arg(long)]
        plan: Option<PlanTier>,
        /// Module ids to toggle on top of the configured defaults.
        #[arg(long, num_args = 1..)]
        select: Vec<String>,
    },

    /// Print the effective configuration as TOML.
    Config {
        /// Print the config file location instead.
        #[arg(long)]
        path: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    fe_telemetry::logging::init("flowenergy", &cfg.general.log_level, cfg.general.log_json);

    let default_tier = cfg.plan.default_tier()?;
    let (span, trace_id) = fe_telemetry::tracing_setup::create_operation_span("cli");
    let _guard = span.enter();
    tracing::debug!(%trace_id, tier = %default_tier, "cli start");

    let out = match cli.command {
        None => commands::charts::render(default_tier, &cfg)?,
        Some(Commands::Charts { plan }) => commands::charts::render(plan.unwrap_or(default_tier), &cfg)?,
        Some(Commands::Chart { id, plan, json }) => {
            commands::chart::render(&id, plan.unwrap_or(default_tier), json)?
        }
        Some(Commands::Gate {
            feature,
            premium,
            description,
        }) => commands::gate::render(&feature, premium, description.as_deref())?,
        Some(Commands::Plans) => commands::plans::render(),
        Some(Commands::Reports { plan, select }) => {
            commands::reports::render(plan.unwrap_or(default_tier), &cfg, &select)?
        }
        Some(Commands::Config { path }) => {
            let location = cli.config.clone().unwrap_or_else(Config::default_path);
            commands::config::render(&cfg, path.then_some(location.as_path()))?
        }
    };

    println!("{out}");
    Ok(())
}
