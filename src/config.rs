//! Unified configuration for slotboard.
//!
//! Settings live in `.slotboard/slotboard.toml` and are layered
//! file → environment → CLI:
//!
//! ```toml
//! [schedule]
//! lookahead_minutes = 120
//! timezone = "Europe/Lisbon"
//! days = 1
//! include_inactive = false
//!
//! [brands.healthycollege]
//! offset = 2
//! ```
//!
//! `[brands.<id>]` entries override the offset the backend reports for a
//! brand. `timezone` takes `local`, a fixed UTC offset such as `+02:00`, or
//! an IANA name. When none is configured anywhere, the machine's zone is
//! used, daylight-saving rules included.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use slotboard_common::{Brand, Zone};

use crate::errors::ConfigError;
use crate::offsets::OffsetTable;
use crate::reconcile::DEFAULT_LOOKAHEAD_MINUTES;

/// The name of the slotboard configuration directory.
pub const CONFIG_DIR: &str = ".slotboard";

/// The name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "slotboard.toml";

pub const ENV_TIMEZONE: &str = "SLOTBOARD_TIMEZONE";
pub const ENV_LOOKAHEAD_MINUTES: &str = "SLOTBOARD_LOOKAHEAD_MINUTES";

const MAX_LOOKAHEAD_MINUTES: i64 = 24 * 60;

/// `[schedule]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSection {
    /// Window in which an unfilled future slot counts as upcoming
    #[serde(default = "default_lookahead_minutes")]
    pub lookahead_minutes: i64,
    /// Zone used to read naive timestamps and to bucket posts into days
    #[serde(default, alias = "utc_offset", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Number of days a coverage report spans
    #[serde(default = "default_days")]
    pub days: u32,
    /// Whether inactive brands appear in reports
    #[serde(default)]
    pub include_inactive: bool,
}

fn default_lookahead_minutes() -> i64 {
    DEFAULT_LOOKAHEAD_MINUTES
}

fn default_days() -> u32 {
    1
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            lookahead_minutes: default_lookahead_minutes(),
            timezone: None,
            days: default_days(),
            include_inactive: false,
        }
    }
}

/// `[brands.<id>]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// The complete slotboard.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotboardToml {
    #[serde(default)]
    pub schedule: ScheduleSection,
    #[serde(default)]
    pub brands: BTreeMap<String, BrandOverride>,
}

impl SlotboardToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse slotboard.toml")
    }

    /// Load from `<config_dir>/slotboard.toml`, or defaults if it doesn't exist.
    pub fn load_or_default(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize slotboard.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Offset overrides as `(brand_id, offset)` pairs.
    pub fn offset_overrides(&self) -> impl Iterator<Item = (&str, i64)> {
        self.brands
            .iter()
            .filter_map(|(id, o)| o.offset.map(|offset| (id.as_str(), offset)))
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let lookahead = self.schedule.lookahead_minutes;
        if lookahead <= 0 {
            warnings.push(format!(
                "lookahead_minutes = {}: no slot will ever be classified as upcoming",
                lookahead
            ));
        } else if lookahead > MAX_LOOKAHEAD_MINUTES {
            warnings.push(format!(
                "lookahead_minutes = {} exceeds one day; every future slot will be upcoming",
                lookahead
            ));
        }

        if let Some(ref zone) = self.schedule.timezone
            && zone.parse::<Zone>().is_err()
        {
            warnings.push(format!(
                "Invalid timezone '{}': expected 'local', an offset like '+02:00', \
                 or a name like 'Europe/Lisbon'",
                zone
            ));
        }

        if self.schedule.days == 0 {
            warnings.push("days = 0: coverage reports will be empty".to_string());
        }

        for (id, offset) in self.offset_overrides() {
            if !(0..24).contains(&offset) {
                warnings.push(format!(
                    "Offset {} for brand '{}' is outside 0-23 and will be normalized to {}",
                    offset,
                    id,
                    offset.rem_euclid(24)
                ));
            }
        }

        warnings
    }
}

/// Resolve the zone: CLI → env → file → the machine's zone.
pub fn resolve_timezone(
    cli: Option<&str>,
    env: Option<&str>,
    file: Option<&str>,
) -> Result<Zone, ConfigError> {
    let layered = [("--timezone", cli), (ENV_TIMEZONE, env), ("slotboard.toml", file)];
    for (origin, value) in layered {
        if let Some(raw) = value {
            return raw
                .parse()
                .map_err(|source| ConfigError::InvalidTimeZone { origin, source });
        }
    }
    Ok(Zone::Local)
}

/// Resolve the lookahead window: CLI → env → file.
pub fn resolve_lookahead(
    cli: Option<i64>,
    env: Option<&str>,
    file: i64,
) -> Result<Duration, ConfigError> {
    let minutes = match (cli, env) {
        (Some(minutes), _) => minutes,
        (None, Some(raw)) => raw.trim().parse().map_err(|_| ConfigError::InvalidLookahead {
            origin: ENV_LOOKAHEAD_MINUTES,
            value: raw.to_string(),
        })?,
        (None, None) => file,
    };
    if minutes < 0 {
        return Err(ConfigError::InvalidLookahead {
            origin: if cli.is_some() {
                "--lookahead"
            } else if env.is_some() {
                ENV_LOOKAHEAD_MINUTES
            } else {
                "slotboard.toml"
            },
            value: minutes.to_string(),
        });
    }
    Ok(Duration::minutes(minutes))
}

/// Get the config directory path for a project.
pub fn get_config_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_DIR)
}

/// Write a default slotboard.toml. Fails if one exists unless `force` is set.
pub fn init_config(project_dir: &Path, force: bool) -> Result<PathBuf> {
    let config_dir = get_config_dir(project_dir);
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory: {}", config_dir.display()))?;

    let config_path = config_dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        return Err(ConfigError::AlreadyExists(config_path).into());
    }

    SlotboardToml::default().save(&config_path)?;
    Ok(config_path)
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub timezone: Option<String>,
    pub lookahead_minutes: Option<i64>,
    pub days: Option<u32>,
    pub include_inactive: bool,
}

/// Configuration merged from slotboard.toml, environment and CLI.
#[derive(Debug, Clone)]
pub struct SlotboardConfig {
    pub project_dir: PathBuf,
    pub config_dir: PathBuf,
    pub toml: SlotboardToml,
    pub cli: CliOverrides,
}

impl SlotboardConfig {
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let config_dir = get_config_dir(&project_dir);
        let toml = SlotboardToml::load_or_default(&config_dir)?;

        Ok(Self {
            project_dir,
            config_dir,
            toml,
            cli: CliOverrides::default(),
        })
    }

    pub fn with_cli_args(project_dir: PathBuf, cli: CliOverrides) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        config.cli = cli;
        Ok(config)
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn timezone(&self) -> Result<Zone> {
        let env = std::env::var(ENV_TIMEZONE).ok();
        Ok(resolve_timezone(
            self.cli.timezone.as_deref(),
            env.as_deref(),
            self.toml.schedule.timezone.as_deref(),
        )?)
    }

    pub fn lookahead(&self) -> Result<Duration> {
        let env = std::env::var(ENV_LOOKAHEAD_MINUTES).ok();
        Ok(resolve_lookahead(
            self.cli.lookahead_minutes,
            env.as_deref(),
            self.toml.schedule.lookahead_minutes,
        )?)
    }

    pub fn days(&self) -> u32 {
        self.cli.days.unwrap_or(self.toml.schedule.days)
    }

    pub fn include_inactive(&self) -> bool {
        self.cli.include_inactive || self.toml.schedule.include_inactive
    }

    /// Offset table seeded from `brands` with config overrides applied.
    pub fn offset_table(&self, brands: &[Brand]) -> OffsetTable {
        OffsetTable::from_brands(brands).with_overrides(self.toml.offset_overrides())
    }

    pub fn validate(&self) -> Vec<String> {
        let mut warnings = self.toml.validate();
        if let Err(e) = self.timezone() {
            warnings.push(e.to_string());
        }
        if let Err(e) = self.lookahead() {
            warnings.push(e.to_string());
        }
        warnings
    }
}
