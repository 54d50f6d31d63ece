// Include the report module directly from report.rs
#[path = "report.rs"]
pub mod report;

// Re-export for convenience
pub use report::generate_walk_report;

// Re-export the walk engine so binary-crate users see one surface
pub use driftwalk_walker::{
    HttpRenderer, PageRenderer, ProgressCallback, RenderOptions, StopReason, WaitUntil, WalkReport,
    Walker,
};
