//! Plain-terminal rendering of plans and coverage.
//!
//! Every function returns a `String` so callers decide where it goes.

use std::fmt::Write;

use console::style;

use crate::coverage::{CoverageReport, CoverageSummary, DayCoverage};
use crate::plan::{SlotKind, SlotPlan};
use crate::reconcile::{ReconciledSlot, SlotState};
use crate::ui::icons::{CALENDAR, FAILED, FILLED, MISSED, OPEN, POST, REEL, UPCOMING, WARNING};

fn state_icon(slot: &ReconciledSlot) -> String {
    if slot.is_failed() {
        return FAILED.to_string();
    }
    match slot.state {
        SlotState::Filled => &FILLED,
        SlotState::Missed => &MISSED,
        SlotState::Upcoming => &UPCOMING,
        SlotState::Open => &OPEN,
    }
    .to_string()
}

fn styled_state(state: SlotState) -> String {
    let label = format!("{:<8}", state.as_str());
    match state {
        SlotState::Filled => style(label).green().to_string(),
        SlotState::Missed => style(label).red().to_string(),
        SlotState::Upcoming => style(label).yellow().to_string(),
        SlotState::Open => style(label).dim().to_string(),
    }
}

fn kind_icon(kind: SlotKind) -> String {
    match kind {
        SlotKind::Reel => REEL.to_string(),
        SlotKind::Post => POST.to_string(),
    }
}

fn summary_line(summary: &CoverageSummary) -> String {
    format!(
        "{}/{} filled, {} missed, {} upcoming, {} open",
        summary.filled,
        summary.total(),
        summary.missed,
        summary.upcoming,
        summary.open
    )
}

/// Render a brand's slot plan in generation order.
pub fn render_plan(plan: &SlotPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        style(format!("Slot plan (offset +{}h)", plan.offset())).bold()
    );
    for slot in plan {
        let _ = writeln!(
            out,
            "  {}{:02}:00  {:<4}  {}",
            kind_icon(slot.kind),
            slot.hour,
            slot.kind.as_str(),
            slot.expected_variant
        );
    }
    let shared = plan.shared_hours();
    if !shared.is_empty() {
        let hours: Vec<String> = shared.iter().map(|h| format!("{:02}:00", h)).collect();
        let _ = writeln!(out, "  shared reel/post hours: {}", hours.join(", "));
    }
    out
}

/// Render one brand-day.
pub fn render_day(day: &DayCoverage) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({})  offset +{}h  {}",
        style(day.date).bold(),
        style(&day.brand_label).cyan().bold(),
        day.brand_id,
        day.offset,
        summary_line(&day.summary)
    );

    let mut slots: Vec<&ReconciledSlot> = day.slots.iter().collect();
    slots.sort_by_key(|s| (s.slot.hour, s.slot.kind == SlotKind::Post));

    for slot in slots {
        let mut line = format!(
            "  {}{:02}:00  {}{:<4}  {:<5}  {}",
            state_icon(slot),
            slot.slot.hour,
            kind_icon(slot.slot.kind),
            slot.slot.kind.as_str(),
            slot.variant().as_str(),
            styled_state(slot.state)
        );
        if let Some(ref matched) = slot.matched {
            let _ = write!(line, "  #{} ({})", matched.post_id, matched.status);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }

    if !day.unplanned.is_empty() {
        let _ = writeln!(
            out,
            "  {}unplanned: {}",
            WARNING,
            day.unplanned.join(", ")
        );
    }
    out
}

/// Render a whole coverage report.
pub fn render_report(report: &CoverageReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}{}",
        CALENDAR,
        style(format!(
            "Coverage from {} for {} day(s), as of {}",
            report.start,
            report.days,
            report.generated_at.format("%Y-%m-%d %H:%M %:z")
        ))
        .bold()
    );
    let _ = writeln!(out);

    if report.brands.is_empty() {
        let _ = writeln!(out, "No brands to report.");
        return out;
    }

    for day in &report.brands {
        out.push_str(&render_day(day));
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Total: {}", summary_line(&report.summary));
    if report.summary.failed > 0 {
        let _ = writeln!(
            out,
            "{}{} filled slot(s) belong to failed posts",
            FAILED, report.summary.failed
        );
    }
    if !report.orphaned_posts.is_empty() {
        let _ = writeln!(
            out,
            "{}{} post(s) reference unknown brands: {}",
            WARNING,
            report.orphaned_posts.len(),
            report.orphaned_posts.join(", ")
        );
    }
    out
}
