//! gradekit CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod playback;

#[derive(Parser)]
#[command(name = "gradekit", version, about = "Deterministic short-answer grading toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a student answer against an ideal answer
    Grade {
        /// Path to the student answer text file
        #[arg(long)]
        student: PathBuf,

        /// Path to the ideal answer text file
        #[arg(long)]
        ideal: PathBuf,

        /// Strictness level, 0 (generous) to 100 (strict)
        #[arg(long, default_value = "50")]
        strictness: u8,

        /// Free-text grading instructions (recorded, not applied to scoring)
        #[arg(long)]
        instructions: Option<String>,

        /// Path to a custom catalog TOML (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "./gradekit-results")]
        output: PathBuf,

        /// Output format: text, html, json, all
        #[arg(long, default_value = "text")]
        format: String,

        /// Play the staged analysis log before printing results
        #[arg(long)]
        playback: bool,

        /// Skip playback delays
        #[arg(long)]
        no_delay: bool,
    },

    /// Compare two grade reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Regression threshold in score points
        #[arg(long, default_value = "5")]
        threshold: u8,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to a catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Show the concepts and rules of a catalog
    Catalog {
        /// Path to a catalog TOML (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Create a starter catalog and sample answer files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradekit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            student,
            ideal,
            strictness,
            instructions,
            catalog,
            output,
            format,
            playback,
            no_delay,
        } => commands::grade::execute(
            student,
            ideal,
            strictness,
            instructions,
            catalog,
            output,
            format,
            playback,
            no_delay,
        ),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Catalog { catalog } => commands::catalog::execute(catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
