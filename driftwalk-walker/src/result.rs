use serde::{Deserialize, Serialize};

/// One render-extract-select cycle, recorded after the page was rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub url: String,
    pub depth: u32,
    pub links_found: usize,
    /// The link the walk followed out of this page; `None` on the final
    /// page of the walk.
    pub chosen: Option<String>,
}

/// Why the walk stopped. None of these are failures of the walk itself;
/// a dead-end page or a render error is a normal outcome of wandering
/// the open web.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// The next hop would exceed the configured depth limit.
    DepthLimit,
    /// The chosen link led back to a page this walk already rendered.
    AlreadyVisited { url: String },
    /// The page rendered fine but no usable links survived filtering.
    NoLinks { url: String },
    /// The renderer failed on this page; the walk ends, no retry.
    RenderFailed { url: String, message: String },
}

impl StopReason {
    pub fn describe(&self) -> String {
        match self {
            StopReason::DepthLimit => "depth limit reached".to_string(),
            StopReason::AlreadyVisited { url } => format!("already visited {url}"),
            StopReason::NoLinks { url } => format!("no usable links on {url}"),
            StopReason::RenderFailed { url, message } => {
                format!("render failed for {url}: {message}")
            }
        }
    }
}

/// Everything one walk did, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkReport {
    pub seed: String,
    pub max_depth: u32,
    pub steps: Vec<StepRecord>,
    /// URLs rendered by this walk, in render order.
    pub visited: Vec<String>,
    pub stopped: StopReason,
}

impl WalkReport {
    pub fn pages_rendered(&self) -> usize {
        self.visited.len()
    }
}
