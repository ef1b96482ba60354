pub mod config;
pub mod coverage;
pub mod errors;
pub mod logging;
pub mod offsets;
pub mod plan;
pub mod reconcile;
pub mod source;
pub mod ui;

pub use coverage::{CoverageReport, CoverageSettings, CoverageSummary, DayCoverage};
pub use offsets::OffsetTable;
pub use plan::{Slot, SlotKind, SlotPlan};
pub use reconcile::{LocalPost, ReconciledSlot, Reconciliation, SlotReconciler, SlotState};
pub use slotboard_common::{Brand, PostStatus, ScheduledPost, Variant, Zone};
