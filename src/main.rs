use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "slotboard")]
#[command(version, about = "Per-brand publish slot planning and coverage")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Time zone for reading timestamps and bucketing days ("local", "+02:00", "Europe/Lisbon")
    #[arg(long, global = true, allow_hyphen_values = true, alias = "utc-offset")]
    pub timezone: Option<String>,

    /// Minutes ahead in which an unfilled slot counts as upcoming. Overrides slotboard.toml.
    #[arg(long, global = true)]
    pub lookahead: Option<i64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the daily slot plan for an hour offset or a known brand
    Plan {
        /// Brand hour offset (any integer, folded into 0-23)
        #[arg(short, long, allow_hyphen_values = true, conflicts_with = "brand")]
        offset: Option<i64>,

        /// Brand id to look up in the brands export
        #[arg(short, long, requires = "brands")]
        brand: Option<String>,

        /// Path to the brands JSON export
        #[arg(long, requires = "brand")]
        brands: Option<PathBuf>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reconcile scheduled posts against each brand's slot plan
    Coverage {
        /// Path to the brands JSON export
        #[arg(long)]
        brands: PathBuf,

        /// Path to the scheduled posts JSON export
        #[arg(long)]
        posts: PathBuf,

        /// First day of the report (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Number of days to report. Overrides slotboard.toml.
        #[arg(long)]
        days: Option<u32>,

        /// Reference time (RFC 3339 or naive local time, defaults to now)
        #[arg(long)]
        now: Option<String>,

        /// Only report this brand id
        #[arg(long)]
        brand: Option<String>,

        /// Include inactive brands
        #[arg(long)]
        include_inactive: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default slotboard.toml file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    slotboard::logging::init_logging(cli.verbose, cli.log_json)?;

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Plan {
            offset,
            brand,
            brands,
            json,
        } => cmd::cmd_plan(
            &cli,
            &project_dir,
            *offset,
            brand.as_deref(),
            brands.as_deref(),
            *json,
        )?,
        Commands::Coverage {
            brands,
            posts,
            date,
            days,
            now,
            brand,
            include_inactive,
            json,
        } => cmd::cmd_coverage(
            &cli,
            &project_dir,
            cmd::CoverageArgs {
                brands,
                posts,
                date: date.as_deref(),
                days: *days,
                now: now.as_deref(),
                brand: brand.as_deref(),
                include_inactive: *include_inactive,
                json: *json,
            },
        )?,
        Commands::Config { command } => cmd::cmd_config(&cli, &project_dir, command.clone())?,
    }

    Ok(())
}
