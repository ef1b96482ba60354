//! Per-brand, per-day slot coverage.
//!
//! `CoverageReport` is what the calendar and home views render: for every
//! brand and every day in a range, the reconciled slots plus the posts that
//! fit no slot, with summary counts at day and report level.

use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use slotboard_common::{Brand, ScheduledPost, Zone};
use tracing::{debug, warn};

use crate::offsets::OffsetTable;
use crate::plan::SlotKind;
use crate::reconcile::{DEFAULT_LOOKAHEAD_MINUTES, ReconciledSlot, SlotReconciler, SlotState};

/// Counts of slot states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub filled: usize,
    pub missed: usize,
    pub upcoming: usize,
    pub open: usize,
    pub reels_filled: usize,
    pub posts_filled: usize,
    pub failed: usize,
    pub unplanned: usize,
}

impl CoverageSummary {
    pub fn from_slots(slots: &[ReconciledSlot], unplanned: usize) -> Self {
        let mut summary = Self {
            unplanned,
            ..Self::default()
        };
        for slot in slots {
            summary.record(slot);
        }
        summary
    }

    fn record(&mut self, slot: &ReconciledSlot) {
        match slot.state {
            SlotState::Filled => {
                self.filled += 1;
                match slot.slot.kind {
                    SlotKind::Reel => self.reels_filled += 1,
                    SlotKind::Post => self.posts_filled += 1,
                }
                if slot.is_failed() {
                    self.failed += 1;
                }
            }
            SlotState::Missed => self.missed += 1,
            SlotState::Upcoming => self.upcoming += 1,
            SlotState::Open => self.open += 1,
        }
    }

    pub fn merge(&mut self, other: &CoverageSummary) {
        self.filled += other.filled;
        self.missed += other.missed;
        self.upcoming += other.upcoming;
        self.open += other.open;
        self.reels_filled += other.reels_filled;
        self.posts_filled += other.posts_filled;
        self.failed += other.failed;
        self.unplanned += other.unplanned;
    }

    pub fn total(&self) -> usize {
        self.filled + self.missed + self.upcoming + self.open
    }

    /// Share of slots filled, 0.0 for an empty summary.
    pub fn fill_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.filled as f64 / total as f64,
        }
    }
}

/// One brand, one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCoverage {
    pub brand_id: String,
    pub brand_label: String,
    pub offset: u8,
    pub date: NaiveDate,
    pub slots: Vec<ReconciledSlot>,
    pub unplanned: Vec<String>,
    pub summary: CoverageSummary,
}

impl DayCoverage {
    pub fn slots_in(&self, state: SlotState) -> impl Iterator<Item = &ReconciledSlot> {
        self.slots.iter().filter(move |s| s.state == state)
    }
}

/// Inputs that shape a report beyond the raw data.
#[derive(Debug, Clone)]
pub struct CoverageSettings {
    pub tz: Zone,
    pub lookahead: Duration,
    pub include_inactive: bool,
    /// Restrict the report to a single brand id.
    pub brand_filter: Option<String>,
}

impl CoverageSettings {
    pub fn new(tz: impl Into<Zone>) -> Self {
        Self {
            tz: tz.into(),
            lookahead: Duration::minutes(DEFAULT_LOOKAHEAD_MINUTES),
            include_inactive: false,
            brand_filter: None,
        }
    }

    pub fn with_lookahead(mut self, lookahead: Duration) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn with_inactive(mut self, include: bool) -> Self {
        self.include_inactive = include;
        self
    }

    pub fn with_brand_filter(mut self, brand_id: Option<String>) -> Self {
        self.brand_filter = brand_id;
        self
    }

    fn wants(&self, brand: &Brand) -> bool {
        if let Some(ref id) = self.brand_filter {
            return &brand.id == id;
        }
        brand.active || self.include_inactive
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub generated_at: DateTime<FixedOffset>,
    pub start: NaiveDate,
    pub days: u32,
    pub lookahead_minutes: i64,
    pub brands: Vec<DayCoverage>,
    pub summary: CoverageSummary,
    /// Posts whose brand id matches no known brand.
    pub orphaned_posts: Vec<String>,
}

impl CoverageReport {
    /// Reconcile every selected brand for `days` days starting at `start`.
    ///
    /// Entries are ordered by brand (input order), then by date.
    pub fn build(
        brands: &[Brand],
        posts: &[ScheduledPost],
        offsets: &OffsetTable,
        start: NaiveDate,
        days: u32,
        now: DateTime<FixedOffset>,
        settings: &CoverageSettings,
    ) -> Self {
        let reconciler = SlotReconciler::new(settings.tz).with_lookahead(settings.lookahead);

        let mut by_brand: HashMap<&str, Vec<&ScheduledPost>> = HashMap::new();
        for post in posts {
            by_brand.entry(post.brand_id.as_str()).or_default().push(post);
        }

        let orphaned_posts: Vec<String> = posts
            .iter()
            .filter(|p| !brands.iter().any(|b| b.id == p.brand_id))
            .map(|p| p.id.clone())
            .collect();
        if !orphaned_posts.is_empty() {
            warn!(count = orphaned_posts.len(), "posts reference unknown brands");
        }

        let mut entries = Vec::new();
        let mut summary = CoverageSummary::default();

        for brand in brands.iter().filter(|b| settings.wants(b)) {
            let plan = offsets.plan_for(&brand.id);
            let brand_posts = reconciler.localize(
                by_brand
                    .get(brand.id.as_str())
                    .into_iter()
                    .flatten()
                    .copied(),
            );
            debug!(
                brand = %brand.id,
                offset = plan.offset(),
                posts = brand_posts.len(),
                "reconciling brand"
            );

            for date in start.iter_days().take(days as usize) {
                let result = reconciler.reconcile_local(&plan, date, &brand_posts, now);
                let day_summary =
                    CoverageSummary::from_slots(&result.slots, result.unplanned.len());
                summary.merge(&day_summary);
                entries.push(DayCoverage {
                    brand_id: brand.id.clone(),
                    brand_label: brand.label().to_string(),
                    offset: plan.offset(),
                    date,
                    slots: result.slots,
                    unplanned: result.unplanned,
                    summary: day_summary,
                });
            }
        }

        Self {
            generated_at: now,
            start,
            days,
            lookahead_minutes: settings.lookahead.num_minutes(),
            brands: entries,
            summary,
            orphaned_posts,
        }
    }

    pub fn for_brand<'a>(&'a self, brand_id: &str) -> impl Iterator<Item = &'a DayCoverage> {
        self.brands.iter().filter(move |d| d.brand_id == brand_id)
    }

    pub fn day(&self, brand_id: &str, date: NaiveDate) -> Option<&DayCoverage> {
        self.brands
            .iter()
            .find(|d| d.brand_id == brand_id && d.date == date)
    }

    /// Earliest slot a brand can still fill within the report range.
    pub fn next_open_slot(&self, brand_id: &str) -> Option<&ReconciledSlot> {
        self.for_brand(brand_id)
            .flat_map(|d| d.slots.iter())
            .filter(|s| s.state.is_available())
            .min_by_key(|s| (s.starts_at, s.slot.kind == SlotKind::Post))
    }
}
