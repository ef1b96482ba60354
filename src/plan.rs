//! Daily slot plan for a brand.
//!
//! Every brand publishes into the same base pattern shifted by its hour
//! offset: six reels four hours apart, alternating light and dark, plus two
//! posts twelve hours apart. A plan is a pure function of the offset.

use serde::{Deserialize, Serialize};
use slotboard_common::{Variant, normalize_hour};

/// Base reel hours before the brand offset is applied.
pub const REEL_BASE_HOURS: [u8; 6] = [0, 4, 8, 12, 16, 20];

/// Base post hours before the brand offset is applied.
pub const POST_BASE_HOURS: [u8; 2] = [0, 12];

/// Number of slots in a daily plan.
pub const SLOTS_PER_DAY: usize = REEL_BASE_HOURS.len() + POST_BASE_HOURS.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Reel,
    Post,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reel => "reel",
            Self::Post => "post",
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed hour-of-day position where one piece of content is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub hour: u8,
    pub kind: SlotKind,
    /// `Light`/`Dark` for reels, always `Post` for post slots.
    pub expected_variant: Variant,
}

impl Slot {
    /// Whether a post of `variant` can fill this slot.
    ///
    /// Reel slots take either reel variant; the expected label is only a
    /// hint and the actual post wins.
    pub fn accepts(&self, variant: Variant) -> bool {
        match self.kind {
            SlotKind::Reel => variant.is_reel(),
            SlotKind::Post => variant == Variant::Post,
        }
    }
}

/// The ordered slots for one brand-day: reels in base-hour order, then posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotPlan {
    offset: u8,
    slots: Vec<Slot>,
}

impl SlotPlan {
    /// Build the plan for a brand hour offset. Any integer is accepted and
    /// folded into `0..24`.
    pub fn for_offset(offset: i64) -> Self {
        let offset = normalize_hour(offset);
        let shift = |base: u8| (base + offset) % 24;

        let reels = REEL_BASE_HOURS.iter().enumerate().map(|(i, &base)| Slot {
            hour: shift(base),
            kind: SlotKind::Reel,
            expected_variant: if i % 2 == 0 {
                Variant::Light
            } else {
                Variant::Dark
            },
        });

        let posts = POST_BASE_HOURS.iter().map(|&base| Slot {
            hour: shift(base),
            kind: SlotKind::Post,
            expected_variant: Variant::Post,
        });

        Self {
            offset,
            slots: reels.chain(posts).collect(),
        }
    }

    pub fn offset(&self) -> u8 {
        self.offset
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn reels(&self) -> impl Iterator<Item = &Slot> {
        self.of_kind(SlotKind::Reel)
    }

    pub fn posts(&self) -> impl Iterator<Item = &Slot> {
        self.of_kind(SlotKind::Post)
    }

    fn of_kind(&self, kind: SlotKind) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(move |s| s.kind == kind)
    }

    pub fn slot_at(&self, kind: SlotKind, hour: u8) -> Option<&Slot> {
        self.of_kind(kind).find(|s| s.hour == hour)
    }

    /// Hours of the given kind in clock order.
    pub fn hours(&self, kind: SlotKind) -> Vec<u8> {
        let mut hours: Vec<u8> = self.of_kind(kind).map(|s| s.hour).collect();
        hours.sort_unstable();
        hours
    }

    /// Hours that carry both a reel and a post slot, in clock order.
    pub fn shared_hours(&self) -> Vec<u8> {
        self.hours(SlotKind::Post)
            .into_iter()
            .filter(|&h| self.slot_at(SlotKind::Reel, h).is_some())
            .collect()
    }
}

impl<'a> IntoIterator for &'a SlotPlan {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_offset_plan() {
        let plan = SlotPlan::for_offset(0);
        assert_eq!(plan.len(), SLOTS_PER_DAY);
        let reels: Vec<(u8, Variant)> =
            plan.reels().map(|s| (s.hour, s.expected_variant)).collect();
        assert_eq!(
            reels,
            vec![
                (0, Variant::Light),
                (4, Variant::Dark),
                (8, Variant::Light),
                (12, Variant::Dark),
                (16, Variant::Light),
                (20, Variant::Dark),
            ]
        );
        assert_eq!(plan.hours(SlotKind::Post), vec![0, 12]);
    }

    #[test]
    fn test_every_offset_shifts_the_base_pattern() {
        for offset in 0..24i64 {
            let plan = SlotPlan::for_offset(offset);
            assert_eq!(plan.reels().count(), 6);
            assert_eq!(plan.posts().count(), 2);

            for (slot, base) in plan.reels().zip(REEL_BASE_HOURS) {
                assert_eq!(i64::from(slot.hour), (i64::from(base) + offset) % 24);
            }
            let variants: Vec<Variant> = plan.reels().map(|s| s.expected_variant).collect();
            for pair in variants.chunks(2) {
                assert_eq!(pair, &[Variant::Light, Variant::Dark][..]);
            }
            for (slot, base) in plan.posts().zip(POST_BASE_HOURS) {
                assert_eq!(i64::from(slot.hour), (i64::from(base) + offset) % 24);
            }
        }
    }

    #[test]
    fn test_offset_two_hours() {
        let plan = SlotPlan::for_offset(2);
        assert_eq!(plan.hours(SlotKind::Reel), vec![2, 6, 10, 14, 18, 22]);
        assert_eq!(plan.hours(SlotKind::Post), vec![2, 14]);
        assert_eq!(plan.shared_hours(), vec![2, 14]);
    }

    #[test]
    fn test_wrapping_offset_keeps_generation_order() {
        let plan = SlotPlan::for_offset(21);
        let hours: Vec<u8> = plan.reels().map(|s| s.hour).collect();
        assert_eq!(hours, vec![21, 1, 5, 9, 13, 17]);
        assert_eq!(plan.hours(SlotKind::Reel), vec![1, 5, 9, 13, 17, 21]);
        // Base hour 0 stays light even after wrapping past midnight.
        assert_eq!(
            plan.slot_at(SlotKind::Reel, 21).map(|s| s.expected_variant),
            Some(Variant::Light)
        );
    }

    #[test]
    fn test_out_of_range_offsets_normalize() {
        assert_eq!(SlotPlan::for_offset(26), SlotPlan::for_offset(2));
        assert_eq!(SlotPlan::for_offset(-1), SlotPlan::for_offset(23));
        assert_eq!(SlotPlan::for_offset(-1).offset(), 23);
    }

    #[test]
    fn test_slot_accepts() {
        let plan = SlotPlan::for_offset(0);
        let reel = plan.slot_at(SlotKind::Reel, 0).unwrap();
        let post = plan.slot_at(SlotKind::Post, 0).unwrap();
        assert!(reel.accepts(Variant::Light));
        assert!(reel.accepts(Variant::Dark));
        assert!(!reel.accepts(Variant::Post));
        assert!(post.accepts(Variant::Post));
        assert!(!post.accepts(Variant::Dark));
    }

    #[test]
    fn test_plan_serializes_for_output() {
        let value = serde_json::to_value(SlotPlan::for_offset(21)).unwrap();
        assert_eq!(value["offset"], 21);
        let slots = value["slots"].as_array().unwrap();
        assert_eq!(slots.len(), SLOTS_PER_DAY);
        assert_eq!(slots[0]["hour"], 21);
        assert_eq!(slots[6]["kind"], "post");
    }
}
