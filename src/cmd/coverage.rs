//! Slot coverage report (`slotboard coverage`).

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use std::path::Path;
use tracing::info;

use slotboard::coverage::{CoverageReport, CoverageSettings};
use slotboard::source::{JsonFileSource, ScheduleSource};
use slotboard::ui::render_report;
use slotboard_common::parse_timestamp;

use super::super::Cli;
use super::load_config;

pub struct CoverageArgs<'a> {
    pub brands: &'a Path,
    pub posts: &'a Path,
    pub date: Option<&'a str>,
    pub days: Option<u32>,
    pub now: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub include_inactive: bool,
    pub json: bool,
}

pub fn cmd_coverage(cli: &Cli, project_dir: &Path, args: CoverageArgs<'_>) -> Result<()> {
    let config = load_config(cli, project_dir, args.days, args.include_inactive)?;
    let tz = config.timezone()?;
    let lookahead = config.lookahead()?;

    let now = match args.now {
        Some(raw) => match parse_timestamp(raw, &tz) {
            Some(now) => now.fixed_offset(),
            None => bail!("Invalid --now '{}': expected RFC 3339 or YYYY-MM-DDTHH:MM", raw),
        },
        None => Utc::now().with_timezone(&tz).fixed_offset(),
    };

    let start = match args.date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid --date '{}': expected YYYY-MM-DD", raw))?,
        None => now.date_naive(),
    };

    let source = JsonFileSource::new(args.brands, args.posts);
    let brands = source.brands().context("Failed to load brands")?;
    let posts = source
        .scheduled_posts()
        .context("Failed to load scheduled posts")?;

    if let Some(id) = args.brand
        && !brands.iter().any(|b| b.id == id)
    {
        bail!("Brand '{}' not found in {}", id, args.brands.display());
    }

    let offsets = config.offset_table(&brands);
    let settings = CoverageSettings::new(tz)
        .with_lookahead(lookahead)
        .with_inactive(config.include_inactive())
        .with_brand_filter(args.brand.map(str::to_string));

    info!(
        brands = brands.len(),
        posts = posts.len(),
        %start,
        days = config.days(),
        "building coverage report"
    );
    let report = CoverageReport::build(
        &brands,
        &posts,
        &offsets,
        start,
        config.days(),
        now,
        &settings,
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}
