//! Reconciliation of a brand's daily slot plan against its scheduled posts.
//!
//! Each slot is matched to the first unused post on the same local day and
//! hour whose variant the slot accepts. Unmatched slots are classified
//! relative to "now": `missed` once their start has passed, `upcoming` when
//! they start within the lookahead window, `open` otherwise.

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
};
use serde::{Deserialize, Serialize};
use slotboard_common::{PostStatus, ScheduledPost, Variant, resolve_local};
use tracing::{debug, warn};

use crate::plan::{Slot, SlotKind, SlotPlan};

/// Default lookahead for classifying an unfilled slot as `upcoming`.
pub const DEFAULT_LOOKAHEAD_MINUTES: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Filled,
    Missed,
    Upcoming,
    Open,
}

impl SlotState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filled => "filled",
            Self::Missed => "missed",
            Self::Upcoming => "upcoming",
            Self::Open => "open",
        }
    }

    /// Slot can still be filled.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Upcoming | Self::Open)
    }
}

impl std::fmt::Display for SlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The post that filled a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMatch {
    pub post_id: String,
    pub variant: Variant,
    pub status: PostStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledSlot {
    pub slot: Slot,
    pub starts_at: DateTime<FixedOffset>,
    pub state: SlotState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<SlotMatch>,
}

impl ReconciledSlot {
    /// Variant to display: the actual post's when filled, otherwise the plan's.
    pub fn variant(&self) -> Variant {
        self.matched
            .as_ref()
            .map(|m| m.variant)
            .unwrap_or(self.slot.expected_variant)
    }

    /// Filled by a post whose publish attempt failed.
    pub fn is_failed(&self) -> bool {
        self.matched
            .as_ref()
            .is_some_and(|m| m.status == PostStatus::Failed)
    }
}

/// Result of reconciling one brand-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub slots: Vec<ReconciledSlot>,
    /// Ids of posts on the day that matched no slot, in input order.
    pub unplanned: Vec<String>,
}

impl Reconciliation {
    pub fn count(&self, state: SlotState) -> usize {
        self.slots.iter().filter(|s| s.state == state).count()
    }
}

/// A post with its scheduled time read as wall-clock time in the
/// reconciler's zone.
#[derive(Debug, Clone, Copy)]
pub struct LocalPost<'a> {
    pub post: &'a ScheduledPost,
    pub local: NaiveDateTime,
    pub variant: Option<Variant>,
}

/// Classifies plan slots for a day in a time zone.
///
/// The zone decides both where a post's timestamp lands and when each slot
/// starts. With a daylight-saving zone the UTC offset is looked up per day.
#[derive(Debug, Clone)]
pub struct SlotReconciler<Z> {
    tz: Z,
    lookahead: Duration,
}

impl<Z: TimeZone> SlotReconciler<Z> {
    pub fn new(tz: Z) -> Self {
        Self {
            tz,
            lookahead: Duration::minutes(DEFAULT_LOOKAHEAD_MINUTES),
        }
    }

    pub fn with_lookahead(mut self, lookahead: Duration) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn tz(&self) -> &Z {
        &self.tz
    }

    pub fn lookahead(&self) -> Duration {
        self.lookahead
    }

    /// Start of the slot at `hour` on `day` in this reconciler's zone.
    pub fn slot_time(&self, day: NaiveDate, hour: u8) -> DateTime<FixedOffset> {
        let naive = day
            .and_hms_opt(u32::from(hour), 0, 0)
            .unwrap_or_else(|| day.and_time(NaiveTime::MIN));
        resolve_local(&self.tz, naive).fixed_offset()
    }

    /// State of an unfilled slot starting at `starts_at`.
    pub fn classify_unfilled(
        &self,
        starts_at: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
    ) -> SlotState {
        if starts_at < now {
            SlotState::Missed
        } else if starts_at - now <= self.lookahead {
            SlotState::Upcoming
        } else {
            SlotState::Open
        }
    }

    /// Read each post's timestamp once. Posts with a malformed timestamp are
    /// logged and dropped.
    pub fn localize<'a, I>(&self, posts: I) -> Vec<LocalPost<'a>>
    where
        I: IntoIterator<Item = &'a ScheduledPost>,
    {
        posts
            .into_iter()
            .filter_map(|post| {
                let Some(at) = post.scheduled_at(&self.tz) else {
                    warn!(
                        post_id = %post.id,
                        scheduled_time = %post.scheduled_time,
                        "unparseable scheduled_time, post ignored"
                    );
                    return None;
                };
                Some(LocalPost {
                    post,
                    local: at.naive_local(),
                    variant: post.variant(),
                })
            })
            .collect()
    }

    /// Reconcile `plan` for `day` against a brand's posts.
    ///
    /// Posts outside `day` are ignored. Posts with a malformed timestamp are
    /// skipped; posts without a recognizable variant match nothing and are
    /// reported as unplanned.
    pub fn reconcile<'a, I>(
        &self,
        plan: &SlotPlan,
        day: NaiveDate,
        posts: I,
        now: DateTime<FixedOffset>,
    ) -> Reconciliation
    where
        I: IntoIterator<Item = &'a ScheduledPost>,
    {
        let posts = self.localize(posts);
        self.reconcile_local(plan, day, &posts, now)
    }

    /// Same as [`reconcile`](Self::reconcile) for posts already passed
    /// through [`localize`](Self::localize).
    pub fn reconcile_local(
        &self,
        plan: &SlotPlan,
        day: NaiveDate,
        posts: &[LocalPost<'_>],
        now: DateTime<FixedOffset>,
    ) -> Reconciliation {
        let candidates: Vec<&LocalPost<'_>> =
            posts.iter().filter(|p| p.local.date() == day).collect();
        let mut used = vec![false; candidates.len()];

        let slots = plan
            .slots()
            .iter()
            .map(|slot| {
                let starts_at = self.slot_time(day, slot.hour);
                let found = candidates.iter().enumerate().find_map(|(i, c)| {
                    let variant = c.variant?;
                    let fits = !used[i]
                        && c.local.hour() == u32::from(slot.hour)
                        && slot.accepts(variant);
                    fits.then_some((i, variant))
                });

                match found {
                    Some((i, variant)) => {
                        used[i] = true;
                        let post = candidates[i].post;
                        debug!(
                            post_id = %post.id,
                            hour = slot.hour,
                            kind = %slot.kind,
                            "post fills slot"
                        );
                        ReconciledSlot {
                            slot: *slot,
                            starts_at,
                            state: SlotState::Filled,
                            matched: Some(SlotMatch {
                                post_id: post.id.clone(),
                                variant,
                                status: post.status,
                            }),
                        }
                    }
                    None => ReconciledSlot {
                        slot: *slot,
                        starts_at,
                        state: self.classify_unfilled(starts_at, now),
                        matched: None,
                    },
                }
            })
            .collect();

        let unplanned = candidates
            .iter()
            .zip(&used)
            .filter(|(_, used)| !**used)
            .map(|(c, _)| c.post.id.clone())
            .collect();

        Reconciliation { slots, unplanned }
    }
}

/// Convenience: reconcile with the default lookahead.
pub fn reconcile_day(
    plan: &SlotPlan,
    day: NaiveDate,
    posts: &[ScheduledPost],
    now: DateTime<FixedOffset>,
) -> Reconciliation {
    SlotReconciler::new(*now.offset()).reconcile(plan, day, posts, now)
}

/// Find the reconciled slot for a kind and hour.
pub fn find_slot(slots: &[ReconciledSlot], kind: SlotKind, hour: u8) -> Option<&ReconciledSlot> {
    slots
        .iter()
        .find(|s| s.slot.kind == kind && s.slot.hour == hour)
}
