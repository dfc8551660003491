//! Brew planner CLI
//!
//! Prints coffee dose, water and a timed pour schedule for manual brewing.

mod profile;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use brew_core::{BrewMethod, BrewResponse, MethodKey, plan_brew};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::profile::{Overrides, Profile};

/// Method CLI enum mirrors brew-core (derive for Clap).
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
enum MethodFlag {
    V60,
    Chemex,
    Aeropress,
    #[value(name = "french_press", alias = "french-press")]
    FrenchPress,
    Moka,
}

impl From<MethodFlag> for MethodKey {
    fn from(m: MethodFlag) -> Self {
        match m {
            MethodFlag::V60 => MethodKey::V60,
            MethodFlag::Chemex => MethodKey::Chemex,
            MethodFlag::Aeropress => MethodKey::Aeropress,
            MethodFlag::FrenchPress => MethodKey::FrenchPress,
            MethodFlag::Moka => MethodKey::Moka,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "brew-cli",
    about = "Calculate coffee, water & pour schedule for manual brewing.",
    version
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plan a brew
    Plan(PlanArgs),

    /// List supported brew methods
    Methods,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Brew method (default: from profile, else v60)
    #[arg(value_enum)]
    method: Option<MethodFlag>,

    /// Number of cups (0.5–12, half-cup steps)
    #[arg(long)]
    cups: Option<f64>,

    /// Size of one cup in ml (default 240)
    #[arg(long)]
    cup_size: Option<f64>,

    /// Water-to-coffee ratio, e.g. 15 for 1:15 (8–20)
    #[arg(long)]
    ratio: Option<f64>,

    /// Target yield in ml (50–3000); overrides --cups
    #[arg(long)]
    yield_ml: Option<f64>,

    /// Start time HH:MM (or "now") to print clock times for each pour
    #[arg(long)]
    start: Option<String>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,

    /// Show temperature, grind and filter recommendations
    #[arg(long, overrides_with = "no_recommendations")]
    recommendations: bool,

    /// Hide temperature, grind and filter recommendations
    #[arg(long, overrides_with = "recommendations")]
    no_recommendations: bool,

    /// Load a profile JSON before applying CLI overrides
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Save the current effective preferences to a profile JSON
    #[arg(long)]
    save_profile: Option<PathBuf>,
}

impl PlanArgs {
    fn overrides(&self) -> Overrides {
        let show_recommendations = if self.recommendations {
            Some(true)
        } else if self.no_recommendations {
            Some(false)
        } else {
            None
        };
        Overrides {
            method: self.method.map(MethodKey::from),
            cups: self.cups,
            cup_size_ml: self.cup_size,
            ratio: self.ratio,
            show_recommendations,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "brew_cli=debug,brew_core=debug"
    } else {
        "brew_cli=info,brew_core=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Plan(args) => run_plan(&args),
        Commands::Methods => {
            println!("{}", render::methods_table(BrewMethod::all()));
            Ok(())
        }
    }
}

fn run_plan(args: &PlanArgs) -> Result<()> {
    // Load profile if present, then apply CLI overrides (CLI wins).
    let stored = match &args.profile {
        Some(path) => {
            let p = Profile::load(path)?;
            debug!(path = %path.display(), "loaded profile");
            p
        }
        None => Profile::default(),
    };
    let prefs = stored.apply(&args.overrides());

    let request = prefs.request(args.yield_ml);
    request.validate()?;
    let start = render::parse_start(args.start.as_deref())?;

    let method = prefs.method.method();
    debug!(method = %method.key, ?request, "planning");
    let plan = plan_brew(method, &request)?;

    // Only preferences that produce a plan are worth keeping.
    if let Some(path) = &args.save_profile {
        prefs.save(path)?;
        info!(path = %path.display(), "profile saved");
    }

    if args.json {
        let response = BrewResponse::from_plan(&plan, prefs.show_recommendations);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("\n=== {} ===", method.name);
    println!("{}", render::summary_table(&plan));

    println!("\n=== Pour schedule ===");
    println!("{}", render::schedule_table(&plan, start));

    if prefs.show_recommendations {
        println!("\nRecommendations:");
        for line in render::recommendation_lines(&plan.recommendation) {
            println!("{line}");
        }
    }
    Ok(())
}
