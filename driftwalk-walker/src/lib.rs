pub mod error;
pub mod filter;
pub mod renderer;
pub mod result;
pub mod walker;

pub use error::{RenderError, RenderResult};
pub use filter::filter_links;
pub use renderer::{HttpRenderer, PageRenderer, RenderOptions, WaitUntil};
pub use result::{StepRecord, StopReason, WalkReport};
pub use walker::{ProgressCallback, Walker};
