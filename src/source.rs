//! Scheduling data sources.
//!
//! The backend owns brands and scheduled posts; slotboard only reads them.
//! `JsonFileSource` consumes JSON exports, either a bare array or an object
//! wrapping the array (`{"brands": [...]}`, `{"posts": [...]}`).
//!
//! Records are decoded one at a time. A record that does not decode is
//! logged and skipped so one bad row never hides the rest of the export.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use slotboard_common::{Brand, ScheduledPost};
use tracing::{debug, warn};

use crate::errors::SourceError;

const BRAND_KEYS: &[&str] = &["brands"];
const POST_KEYS: &[&str] = &["posts", "scheduled_posts", "schedules"];

/// Anything that can answer the brand-list and scheduled-posts queries.
pub trait ScheduleSource {
    fn brands(&self) -> Result<Vec<Brand>, SourceError>;
    fn scheduled_posts(&self) -> Result<Vec<ScheduledPost>, SourceError>;
}

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    brands_path: PathBuf,
    posts_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(brands_path: impl Into<PathBuf>, posts_path: impl Into<PathBuf>) -> Self {
        Self {
            brands_path: brands_path.into(),
            posts_path: posts_path.into(),
        }
    }
}

fn read_document(kind: &'static str, path: &Path) -> Result<Value, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SourceError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Pull the record array out of a bare or wrapped export.
fn record_array(
    kind: &'static str,
    path: &Path,
    doc: Value,
    keys: &[&str],
) -> Result<Vec<Value>, SourceError> {
    let wrapped = match doc {
        Value::Array(items) => return Ok(items),
        Value::Object(mut map) => keys.iter().find_map(|key| map.remove(*key)),
        _ => None,
    };
    match wrapped {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(SourceError::Shape {
            kind,
            path: path.to_path_buf(),
        }),
    }
}

fn read_records<T: DeserializeOwned>(
    kind: &'static str,
    path: &Path,
    keys: &[&str],
) -> Result<Vec<T>, SourceError> {
    let items = record_array(kind, path, read_document(kind, path)?, keys)?;
    let total = items.len();

    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(kind, index, path = %path.display(), %error, "skipping malformed record");
                None
            }
        })
        .collect();

    debug!(
        kind,
        count = records.len(),
        skipped = total - records.len(),
        path = %path.display(),
        "loaded export"
    );
    Ok(records)
}

/// Read a brands export on its own.
pub fn load_brands(path: &Path) -> Result<Vec<Brand>, SourceError> {
    read_records("brands", path, BRAND_KEYS)
}

/// Read a scheduled-posts export on its own.
pub fn load_posts(path: &Path) -> Result<Vec<ScheduledPost>, SourceError> {
    read_records("posts", path, POST_KEYS)
}

impl ScheduleSource for JsonFileSource {
    fn brands(&self) -> Result<Vec<Brand>, SourceError> {
        load_brands(&self.brands_path)
    }

    fn scheduled_posts(&self) -> Result<Vec<ScheduledPost>, SourceError> {
        load_posts(&self.posts_path)
    }
}
