use crate::error::{RenderError, RenderResult};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

/// How long a renderer should wait before harvesting anchors.
///
/// An HTTP fetch has no script execution, so `HttpRenderer` treats all
/// three the same; browser-backed renderers can distinguish them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    Immediate,
    DomReady,
    NetworkIdle,
}

/// Per-step rendering parameters.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub wait_until: WaitUntil,
    pub timeout: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wait_until: WaitUntil::DomReady,
            timeout: Duration::from_secs(30),
        }
    }
}

/// A page-rendering collaborator: loads one URL and harvests raw anchor
/// `href` candidates.
///
/// `render` holds whatever per-step resource the backend needs (an HTTP
/// response, a browser page); the walker calls `release` exactly once per
/// step, on every exit path, before moving on.
pub trait PageRenderer {
    fn render(
        &mut self,
        url: &str,
        options: &RenderOptions,
    ) -> impl Future<Output = RenderResult<Vec<String>>>;

    /// Frees the per-step resource acquired by the last `render` call.
    fn release(&mut self) -> impl Future<Output = ()>;
}

/// Production renderer: plain HTTP fetch plus CSS-selector extraction.
#[derive(Debug)]
pub struct HttpRenderer {
    client: reqwest::Client,
    selector: Selector,
}

impl HttpRenderer {
    /// Renderer with the default `a` selector.
    pub fn new() -> RenderResult<Self> {
        Self::with_selector("a")
    }

    /// Renderer with a site-specific anchor selector, e.g. `a.titlelink`.
    pub fn with_selector(selector: &str) -> RenderResult<Self> {
        let parsed = Selector::parse(selector)
            .map_err(|e| RenderError::Selector(selector.to_string(), e.to_string()))?;

        let client = reqwest::Client::builder()
            .user_agent("Driftwalk/0.1 (https://github.com/trapdoorsec/driftwalk)")
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            selector: parsed,
        })
    }

    fn extract_anchors(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_owned)
            .collect()
    }
}

impl PageRenderer for HttpRenderer {
    async fn render(&mut self, url: &str, options: &RenderOptions) -> RenderResult<Vec<String>> {
        let response = self
            .client
            .get(url)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| classify(e, options.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Navigation(format!("HTTP {status} for {url}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify(e, options.timeout))?;

        let anchors = self.extract_anchors(&body);
        debug!("Rendered {}: {} bytes, {} anchors", url, body.len(), anchors.len());
        Ok(anchors)
    }

    async fn release(&mut self) {
        // The response body is consumed inside render, so the connection is
        // already back in the client pool; nothing held between steps.
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> RenderError {
    if err.is_timeout() {
        RenderError::Timeout(timeout)
    } else {
        RenderError::Navigation(err.to_string())
    }
}
