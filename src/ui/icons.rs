//! Shared UI icons.
//!
//! Emoji with plain-text fallbacks for terminals that can't render them.

use console::Emoji;

// Slot states
pub static FILLED: Emoji<'_, '_> = Emoji("✅ ", "[x]");
pub static MISSED: Emoji<'_, '_> = Emoji("❌ ", "[!]");
pub static UPCOMING: Emoji<'_, '_> = Emoji("⏳ ", "[~]");
pub static OPEN: Emoji<'_, '_> = Emoji("⬜ ", "[ ]");
pub static FAILED: Emoji<'_, '_> = Emoji("⚠️  ", "[F]");

// Content kinds
pub static REEL: Emoji<'_, '_> = Emoji("🎬 ", "");
pub static POST: Emoji<'_, '_> = Emoji("🖼️  ", "");

// Report
pub static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "!");
