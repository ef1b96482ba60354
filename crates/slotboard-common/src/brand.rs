use serde::{Deserialize, Serialize};

use crate::time::normalize_hour;

/// A brand as exported by the backend.
///
/// Field aliases accept the camelCase names the dashboard API uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    #[serde(default, alias = "displayName", alias = "name")]
    pub display_name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, alias = "shortName")]
    pub short_name: Option<String>,
    /// Hour shift applied to the base slot pattern. Missing means 0.
    #[serde(default, alias = "scheduleOffset")]
    pub schedule_offset: Option<i64>,
    #[serde(default = "default_active", alias = "isActive")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Brand {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, offset: i64) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            color: None,
            short_name: None,
            schedule_offset: Some(offset),
            active: true,
        }
    }

    /// Offset folded into `0..24`; a missing offset is 0.
    pub fn hour_offset(&self) -> u8 {
        normalize_hour(self.schedule_offset.unwrap_or(0))
    }

    /// Short label for compact views, falling back to the display name and then the id.
    pub fn label(&self) -> &str {
        self.short_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| Some(self.display_name.as_str()).filter(|s| !s.is_empty()))
            .unwrap_or(self.id.as_str())
    }
}
