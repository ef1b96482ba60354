//! Brand hour offsets keyed by brand id.
//!
//! One table serves every view. It is seeded from the brand list and then
//! overridden from configuration; unknown brands fall back to offset 0.

use std::collections::HashMap;

use slotboard_common::{Brand, normalize_hour};

use crate::plan::SlotPlan;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetTable {
    offsets: HashMap<String, u8>,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_brands(brands: &[Brand]) -> Self {
        let offsets = brands
            .iter()
            .map(|b| (b.id.clone(), b.hour_offset()))
            .collect();
        Self { offsets }
    }

    /// Apply overrides on top of the current entries.
    pub fn with_overrides<I, K>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        for (id, offset) in overrides {
            self.insert(id, offset);
        }
        self
    }

    pub fn insert(&mut self, brand_id: impl Into<String>, offset: i64) {
        self.offsets.insert(brand_id.into(), normalize_hour(offset));
    }

    pub fn offset_for(&self, brand_id: &str) -> u8 {
        self.offsets.get(brand_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, brand_id: &str) -> bool {
        self.offsets.contains_key(brand_id)
    }

    pub fn plan_for(&self, brand_id: &str) -> SlotPlan {
        SlotPlan::for_offset(i64::from(self.offset_for(brand_id)))
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
