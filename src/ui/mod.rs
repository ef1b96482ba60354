pub mod icons;
pub mod render;

pub use render::{render_day, render_plan, render_report};
