//! Configuration view and validation commands (`slotboard config`).

use anyhow::Result;
use std::path::Path;

use slotboard::config::{CONFIG_FILE, SlotboardToml, get_config_dir, init_config};

use super::super::{Cli, ConfigCommands};
use super::load_config;

pub fn cmd_config(cli: &Cli, project_dir: &Path, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = get_config_dir(project_dir).join(CONFIG_FILE);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Slotboard Configuration");
            println!("=======================");
            println!();

            let toml = if config_path.exists() {
                println!("Config file: {}", config_path.display());
                SlotboardToml::load(&config_path)?
            } else {
                println!("No slotboard.toml found at {}", config_path.display());
                println!("Using default configuration.");
                SlotboardToml::default()
            };
            println!();

            println!("[schedule]");
            println!("  lookahead_minutes = {}", toml.schedule.lookahead_minutes);
            match &toml.schedule.timezone {
                Some(zone) => println!("  timezone = \"{}\"", zone),
                None => println!("  timezone = (local)"),
            }
            println!("  days = {}", toml.schedule.days);
            println!("  include_inactive = {}", toml.schedule.include_inactive);
            println!();

            let overrides: Vec<(&str, i64)> = toml.offset_overrides().collect();
            if !overrides.is_empty() {
                println!("[brands]");
                for (id, offset) in overrides {
                    println!("  {}.offset = {}", id, offset);
                }
                println!();
            }

            let config = load_config(cli, project_dir, None, false)?;
            println!("Effective values (with env/CLI overrides):");
            println!("  timezone = \"{}\"", config.timezone()?);
            println!(
                "  lookahead_minutes = {}",
                config.lookahead()?.num_minutes()
            );
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No slotboard.toml found. Using defaults (valid).");
                return Ok(());
            }

            let config = load_config(cli, project_dir, None, false)?;
            let warnings = config.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init { force }) => {
            if config_path.exists() && !force {
                println!("slotboard.toml already exists at {}", config_path.display());
                println!("Use --force to overwrite it.");
                return Ok(());
            }

            let path = init_config(project_dir, force)?;
            println!("Created slotboard.toml at {}", path.display());
            println!();
            println!("You can now customize:");
            println!("  - [schedule] lookahead_minutes, timezone, days, include_inactive");
            println!("  - [brands.<id>] offset to override a brand's hour offset");
            println!();
        }
    }

    Ok(())
}
