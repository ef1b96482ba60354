//! Shared domain types for slotboard.
//!
//! These mirror the records the scheduling backend exports: brands with their
//! per-brand hour offset, and scheduled posts carrying a timestamp and a
//! content variant. Parsing is lenient; the slot logic built on top of these
//! types never fails on malformed input.

pub mod brand;
pub mod error;
pub mod post;
pub mod time;

pub use brand::Brand;
pub use error::ModelError;
pub use post::{PostMetadata, PostStatus, ScheduledPost, Variant};
pub use time::{
    Zone, ZoneOffset, normalize_hour, parse_timestamp, parse_utc_offset, resolve_local,
};
