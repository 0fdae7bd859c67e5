//! bs-surface CLI
//!
//! Command-line front end for the Black-Scholes calculator.
//!
//! # Commands
//!
//! - `bs-surface calculate` - Price one option and print its result row
//! - `bs-surface heatmap` - Render call/put sensitivity heatmaps to SVG
//! - `bs-surface batch --input <file>` - Price every row of a CSV file

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use bs_surface::{
    render_heatmaps, AppConfig, CalculationForm, HeatmapForm, InputMode, RenderOptions, Session,
};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Black-Scholes option calculator
#[derive(Parser)]
#[command(name = "bs-surface")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a call and a put for one set of inputs
    Calculate {
        /// Label for the result row
        #[arg(short, long, default_value = "")]
        name: String,

        /// Spot price (S)
        #[arg(long, allow_hyphen_values = true)]
        spot: String,

        /// Strike price (K)
        #[arg(long, allow_hyphen_values = true)]
        strike: String,

        /// Time to maturity in years (T)
        #[arg(long, allow_hyphen_values = true)]
        time: String,

        /// Risk-free rate in percent
        #[arg(long, allow_hyphen_values = true)]
        rate: String,

        /// Volatility in percent
        #[arg(long, allow_hyphen_values = true)]
        vol: String,
    },

    /// Render call/put price heatmaps over spot and volatility
    Heatmap {
        #[arg(long, allow_hyphen_values = true)]
        min_spot: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        max_spot: Option<String>,

        /// Minimum volatility in percent
        #[arg(long, allow_hyphen_values = true)]
        min_vol: Option<String>,

        /// Maximum volatility in percent
        #[arg(long, allow_hyphen_values = true)]
        max_vol: Option<String>,

        /// SVG output path (defaults to render.output from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the grids as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Price every row of a CSV file with columns name,spot,strike,time,rate,vol
    Batch {
        #[arg(short, long)]
        input: PathBuf,

        /// Results CSV path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_tracing(level);

    let mut session = Session::new(config.surface);

    match cli.command {
        Commands::Calculate {
            name,
            spot,
            strike,
            time,
            rate,
            vol,
        } => {
            session.mode = InputMode::Calculation(CalculationForm {
                name,
                spot,
                strike,
                time_to_maturity: time,
                rate_pct: rate,
                vol_pct: vol,
            });
            run_calculate(&mut session)
        }
        Commands::Heatmap {
            min_spot,
            max_spot,
            min_vol,
            max_vol,
            output,
            csv,
        } => {
            let defaults = config.heatmap_defaults.to_form();
            session.mode = InputMode::Heatmap(HeatmapForm {
                min_spot: min_spot.unwrap_or(defaults.min_spot),
                max_spot: max_spot.unwrap_or(defaults.max_spot),
                min_vol_pct: min_vol.unwrap_or(defaults.min_vol_pct),
                max_vol_pct: max_vol.unwrap_or(defaults.max_vol_pct),
            });
            let output = output.unwrap_or_else(|| PathBuf::from(&config.render.output));
            let options = RenderOptions {
                width: config.render.width,
                height: config.render.height,
            };
            run_heatmap(&mut session, &options, &output, csv.as_deref())
        }
        Commands::Batch { input, output } => run_batch(&mut session, &input, output.as_deref()),
    }
}

fn run_calculate(session: &mut Session) -> Result<()> {
    let row = session
        .calculate()
        .map(|row| row.clone())
        .map_err(|e| anyhow!("{}", e))?;

    println!("{:<16} {:>12} {:>12}", "Name", "Call Price", "Put Price");
    println!("{}", "-".repeat(42));
    println!(
        "{:<16} {:>12} {:>12}",
        row.name, row.call_price, row.put_price
    );
    if let Some(details) = session.details_for(&row.name) {
        println!("\n{}", details);
    }
    println!("\n{}", session.status());
    Ok(())
}

fn run_heatmap(
    session: &mut Session,
    options: &RenderOptions,
    output: &Path,
    csv_path: Option<&Path>,
) -> Result<()> {
    let surface = session.update_heatmap().map_err(|e| anyhow!("{}", e))?;

    render_heatmaps(&surface, options, output)
        .with_context(|| format!("Failed to render heatmaps to {}", output.display()))?;
    println!("Heatmaps saved to {}", output.display());

    if let Some(path) = csv_path {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        surface.write_csv(file)?;
        println!("Surface grid saved to {}", path.display());
    }
    Ok(())
}

fn run_batch(session: &mut Session, input: &Path, output: Option<&Path>) -> Result<()> {
    let file =
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let summary = session.run_batch(file)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            session.write_results_csv(file)?;
        }
        None => session.write_results_csv(io::stdout().lock())?,
    }

    if !summary.rejected_lines.is_empty() {
        warn!(
            skipped = summary.rejected_lines.len(),
            lines = ?summary.rejected_lines,
            "Some batch records were not priced"
        );
    }
    Ok(())
}
