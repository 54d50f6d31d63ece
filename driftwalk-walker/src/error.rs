use std::time::Duration;
use thiserror::Error;

/// Failures a page renderer can report for a single step.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("render timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid link selector '{0}': {1}")]
    Selector(String, String),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;
