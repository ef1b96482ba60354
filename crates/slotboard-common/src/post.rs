use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ModelError;
use crate::time::parse_timestamp;

/// Content subtype: `light`/`dark` for reels, `post` for carousel/image posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Light,
    Dark,
    Post,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Post => "post",
        }
    }

    pub fn is_reel(&self) -> bool {
        matches!(self, Self::Light | Self::Dark)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "post" => Ok(Self::Post),
            _ => Err(ModelError::UnknownVariant(s.to_string())),
        }
    }
}

/// Lifecycle status of a scheduled post.
///
/// Deserialization is lenient: unknown values read as `Scheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PostStatus {
    #[default]
    Scheduled,
    Published,
    Failed,
    Partial,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Failed => "failed",
            Self::Partial => "partial",
        }
    }
}

impl FromStr for PostStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "published" => Ok(Self::Published),
            "failed" => Ok(Self::Failed),
            "partial" => Ok(Self::Partial),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

impl From<String> for PostStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form post metadata. Only `variant` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A post as returned by the scheduled-posts query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPost {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "brand", alias = "brandId")]
    pub brand_id: String,
    /// Raw timestamp as sent by the backend; parsed on demand. Non-string
    /// values are kept as their JSON text and never parse.
    #[serde(default, alias = "scheduledTime", deserialize_with = "lenient_string")]
    pub scheduled_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PostStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: PostMetadata,
    #[serde(default, alias = "thumbnailPath")]
    pub thumbnail_path: Option<String>,
    #[serde(default, alias = "videoPath")]
    pub video_path: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl ScheduledPost {
    pub fn new(
        id: impl Into<String>,
        brand_id: impl Into<String>,
        scheduled_time: impl Into<String>,
        variant: Variant,
    ) -> Self {
        Self {
            id: id.into(),
            brand_id: brand_id.into(),
            scheduled_time: scheduled_time.into(),
            status: PostStatus::Scheduled,
            metadata: PostMetadata {
                variant: Some(variant.as_str().to_string()),
                extra: serde_json::Map::new(),
            },
            thumbnail_path: None,
            video_path: None,
            caption: None,
        }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    /// The post's variant, or `None` when missing or unrecognized.
    pub fn variant(&self) -> Option<Variant> {
        self.metadata
            .variant
            .as_deref()
            .and_then(|v| v.parse().ok())
    }

    /// Scheduled time in `tz`, or `None` when the timestamp is malformed.
    pub fn scheduled_at<Z: TimeZone>(&self, tz: &Z) -> Option<DateTime<Z>> {
        parse_timestamp(&self.scheduled_time, tz)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
