//! Slot plan display (`slotboard plan`).

use anyhow::{Context, Result, bail};
use std::path::Path;

use slotboard::plan::SlotPlan;
use slotboard::source::load_brands;
use slotboard::ui::render_plan;

use super::super::Cli;
use super::load_config;

pub fn cmd_plan(
    cli: &Cli,
    project_dir: &Path,
    offset: Option<i64>,
    brand: Option<&str>,
    brands_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let plan = match (brand, brands_path) {
        (Some(brand_id), Some(path)) => {
            let config = load_config(cli, project_dir, None, false)?;
            let brands = load_brands(path).context("Failed to load brands")?;
            let table = config.offset_table(&brands);
            if !table.contains(brand_id) {
                bail!("Brand '{}' not found in {}", brand_id, path.display());
            }
            table.plan_for(brand_id)
        }
        _ => SlotPlan::for_offset(offset.unwrap_or(0)),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?
        );
    } else {
        print!("{}", render_plan(&plan));
    }

    Ok(())
}
