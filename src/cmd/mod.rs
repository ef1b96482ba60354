//! CLI command implementations.
//!
//! | Module     | Commands handled |
//! |------------|------------------|
//! | `plan`     | `Plan`           |
//! | `coverage` | `Coverage`       |
//! | `config`   | `Config`         |

pub mod config;
pub mod coverage;
pub mod plan;

pub use config::cmd_config;
pub use coverage::{CoverageArgs, cmd_coverage};
pub use plan::cmd_plan;

use anyhow::Result;
use slotboard::config::{CliOverrides, SlotboardConfig};
use std::path::Path;

use super::Cli;

/// Load project configuration with the global CLI overrides applied.
fn load_config(
    cli: &Cli,
    project_dir: &Path,
    days: Option<u32>,
    include_inactive: bool,
) -> Result<SlotboardConfig> {
    SlotboardConfig::with_cli_args(
        project_dir.to_path_buf(),
        CliOverrides {
            timezone: cli.timezone.clone(),
            lookahead_minutes: cli.lookahead,
            days,
            include_inactive,
        },
    )
}
