use crate::filter::filter_links;
use crate::renderer::{PageRenderer, RenderOptions};
use crate::result::{StepRecord, StopReason, WalkReport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub type ProgressCallback = Arc<dyn Fn(u32, String) + Send + Sync>;

/// Drives one random walk at a time: render the current page, filter its
/// links, follow one at random, repeat until a terminal condition.
///
/// The visited set lives inside a single `walk` call, so one `Walker` can
/// run walks back to back and independent walkers never share state.
pub struct Walker<P, R = StdRng> {
    renderer: P,
    rng: R,
    max_depth: u32,
    options: RenderOptions,
    progress_callback: Option<ProgressCallback>,
}

impl<P: PageRenderer> Walker<P> {
    pub fn new(renderer: P) -> Self {
        Self {
            renderer,
            rng: StdRng::from_entropy(),
            max_depth: 3,
            options: RenderOptions::default(),
            progress_callback: None,
        }
    }
}

impl<P: PageRenderer, R: Rng> Walker<P, R> {
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the link-selection RNG, e.g. with a mock for tests.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> Walker<P, R2> {
        Walker {
            renderer: self.renderer,
            rng,
            max_depth: self.max_depth,
            options: self.options,
            progress_callback: self.progress_callback,
        }
    }

    /// Seeds the selection RNG for a reproducible walk.
    pub fn with_rng_seed(self, seed: u64) -> Walker<P, StdRng> {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Walks from `seed_url` until a terminal condition is hit.
    ///
    /// Never returns an error: renderer failures end the walk and are
    /// reported through `WalkReport::stopped`, not propagated.
    pub async fn walk(&mut self, seed_url: &str) -> WalkReport {
        info!("Starting walk of {} (max depth {})", seed_url, self.max_depth);

        let mut visited: HashSet<String> = HashSet::new();
        let mut render_order: Vec<String> = Vec::new();
        let mut steps: Vec<StepRecord> = Vec::new();
        let mut url = seed_url.to_string();
        let mut depth: u32 = 1;

        let stopped = loop {
            // Depth is checked before the visited set: an exhausted walk
            // stops even if the next page would be new
            if depth > self.max_depth {
                info!("Max depth ({}) reached, stopping", self.max_depth);
                break StopReason::DepthLimit;
            }

            // Single insert-and-check; a URL enters the set exactly once,
            // immediately before it is rendered
            if !visited.insert(url.clone()) {
                info!("Already visited {}, stopping", url);
                break StopReason::AlreadyVisited { url };
            }
            render_order.push(url.clone());

            if let Some(ref callback) = self.progress_callback {
                callback(depth, url.clone());
            }

            info!("Rendering (depth {}): {}", depth, url);
            let rendered = self.renderer.render(&url, &self.options).await;
            // One release per step, on every exit path, before anything else
            self.renderer.release().await;

            let anchors = match rendered {
                Ok(anchors) => anchors,
                Err(e) => {
                    warn!("Render failed for {}: {}", url, e);
                    break StopReason::RenderFailed {
                        url,
                        message: e.to_string(),
                    };
                }
            };

            let links = filter_links(anchors);
            debug!("{} usable links on {}", links.len(), url);

            if links.is_empty() {
                info!("No usable links on {}, stopping", url);
                steps.push(StepRecord {
                    url: url.clone(),
                    depth,
                    links_found: 0,
                    chosen: None,
                });
                break StopReason::NoLinks { url };
            }

            let index = self.rng.gen_range(0..links.len());
            let next = links[index].clone();
            info!("Chose link {}/{}: {}", index + 1, links.len(), next);

            steps.push(StepRecord {
                url,
                depth,
                links_found: links.len(),
                chosen: Some(next.clone()),
            });

            url = next;
            depth += 1;
        };

        info!(
            "Walk finished after {} page(s): {}",
            render_order.len(),
            stopped.describe()
        );

        WalkReport {
            seed: seed_url.to_string(),
            max_depth: self.max_depth,
            steps,
            visited: render_order,
            stopped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RenderError, RenderResult};
    use rand::rngs::mock::StepRng;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory renderer serving a fixed page graph and counting calls.
    struct ScriptedRenderer {
        pages: HashMap<String, Result<Vec<String>, String>>,
        renders: Arc<Mutex<Vec<String>>>,
        releases: Arc<AtomicUsize>,
    }

    impl ScriptedRenderer {
        fn new(pages: Vec<(&str, Result<Vec<&str>, &str>)>) -> Self {
            let pages = pages
                .into_iter()
                .map(|(url, outcome)| {
                    let outcome = match outcome {
                        Ok(anchors) => Ok(anchors.into_iter().map(str::to_owned).collect()),
                        Err(msg) => Err(msg.to_string()),
                    };
                    (url.to_string(), outcome)
                })
                .collect();
            Self {
                pages,
                renders: Arc::new(Mutex::new(Vec::new())),
                releases: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn renders(&self) -> Arc<Mutex<Vec<String>>> {
            self.renders.clone()
        }

        fn releases(&self) -> Arc<AtomicUsize> {
            self.releases.clone()
        }
    }

    impl PageRenderer for ScriptedRenderer {
        async fn render(
            &mut self,
            url: &str,
            _options: &RenderOptions,
        ) -> RenderResult<Vec<String>> {
            self.renders.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some(Ok(anchors)) => Ok(anchors.clone()),
                Some(Err(msg)) => Err(RenderError::Navigation(msg.clone())),
                None => Err(RenderError::Navigation(format!("no page for {url}"))),
            }
        }

        async fn release(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn zero_rng() -> StepRng {
        // Always draws index 0
        StepRng::new(0, 0)
    }

    #[tokio::test]
    async fn test_walk_seed_to_dead_end() {
        let renderer = ScriptedRenderer::new(vec![
            (
                "https://seed.test/",
                Ok(vec![
                    "https://a.test/",
                    "https://a.test/",
                    "https://b.test/",
                ]),
            ),
            ("https://a.test/", Ok(vec![])),
        ]);
        let renders = renderer.renders();
        let releases = renderer.releases();

        let mut walker = Walker::new(renderer).with_max_depth(2).with_rng(zero_rng());
        let report = walker.walk("https://seed.test/").await;

        assert_eq!(
            report.stopped,
            StopReason::NoLinks {
                url: "https://a.test/".to_string()
            }
        );
        assert_eq!(report.visited, vec!["https://seed.test/", "https://a.test/"]);
        assert_eq!(report.pages_rendered(), 2);
        assert_eq!(renders.lock().unwrap().len(), 2);

        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[0].depth, 1);
        assert_eq!(report.steps[0].links_found, 2); // duplicates collapsed
        assert_eq!(
            report.steps[0].chosen,
            Some("https://a.test/".to_string())
        );
        assert_eq!(report.steps[1].depth, 2);
        assert_eq!(report.steps[1].links_found, 0);
        assert_eq!(report.steps[1].chosen, None);

        // One release per rendered page
        assert_eq!(releases.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_depth_limit_stops_before_visited_check() {
        let renderer = ScriptedRenderer::new(vec![
            ("https://seed.test/", Ok(vec!["https://fresh.test/"])),
            ("https://fresh.test/", Ok(vec!["https://x.test/"])),
        ]);
        let renders = renderer.renders();

        let mut walker = Walker::new(renderer).with_max_depth(1).with_rng(zero_rng());
        let report = walker.walk("https://seed.test/").await;

        // fresh.test was never visited, but the depth bound wins
        assert_eq!(report.stopped, StopReason::DepthLimit);
        assert_eq!(*renders.lock().unwrap(), vec!["https://seed.test/"]);
    }

    #[tokio::test]
    async fn test_cycle_stops_without_second_render() {
        let renderer = ScriptedRenderer::new(vec![(
            "https://seed.test/",
            Ok(vec!["https://seed.test/"]),
        )]);
        let renders = renderer.renders();

        let mut walker = Walker::new(renderer).with_max_depth(5).with_rng(zero_rng());
        let report = walker.walk("https://seed.test/").await;

        assert_eq!(
            report.stopped,
            StopReason::AlreadyVisited {
                url: "https://seed.test/".to_string()
            }
        );
        // The revisit is caught before rendering, so exactly one render
        assert_eq!(renders.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_render_failure_ends_walk_and_releases_once() {
        let renderer =
            ScriptedRenderer::new(vec![("https://seed.test/", Err("connection refused"))]);
        let releases = renderer.releases();

        let mut walker = Walker::new(renderer).with_max_depth(3).with_rng(zero_rng());
        let report = walker.walk("https://seed.test/").await;

        match &report.stopped {
            StopReason::RenderFailed { url, message } => {
                assert_eq!(url, "https://seed.test/");
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected RenderFailed, got {other:?}"),
        }
        assert!(report.steps.is_empty());
        assert_eq!(report.visited, vec!["https://seed.test/"]);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_noisy_anchors_filtered_before_selection() {
        let renderer = ScriptedRenderer::new(vec![
            (
                "https://seed.test/",
                Ok(vec!["javascript:void(0)", "", "/relative", "https://a.test/"]),
            ),
            ("https://a.test/", Ok(vec![])),
        ]);

        let mut walker = Walker::new(renderer).with_max_depth(3).with_rng(zero_rng());
        let report = walker.walk("https://seed.test/").await;

        // Index 0 lands on the only survivor, not on the javascript: entry
        assert_eq!(report.steps[0].links_found, 1);
        assert_eq!(report.steps[0].chosen, Some("https://a.test/".to_string()));
    }

    #[tokio::test]
    async fn test_walks_do_not_share_visited_state() {
        let renderer = ScriptedRenderer::new(vec![("https://seed.test/", Ok(vec![]))]);
        let renders = renderer.renders();

        let mut walker = Walker::new(renderer).with_max_depth(3).with_rng(zero_rng());
        let first = walker.walk("https://seed.test/").await;
        let second = walker.walk("https://seed.test/").await;

        // The second walk renders the seed again instead of bailing out
        assert_eq!(first.stopped, second.stopped);
        assert_eq!(renders.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_progress_callback_sees_each_step() {
        let renderer = ScriptedRenderer::new(vec![
            ("https://seed.test/", Ok(vec!["https://a.test/"])),
            ("https://a.test/", Ok(vec![])),
        ]);

        let observed: Arc<Mutex<Vec<(u32, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let observed_clone = observed.clone();

        let mut walker = Walker::new(renderer)
            .with_max_depth(3)
            .with_progress_callback(Arc::new(move |depth, url| {
                observed_clone.lock().unwrap().push((depth, url));
            }))
            .with_rng(zero_rng());
        walker.walk("https://seed.test/").await;

        let observed = observed.lock().unwrap();
        assert_eq!(
            *observed,
            vec![
                (1, "https://seed.test/".to_string()),
                (2, "https://a.test/".to_string()),
            ]
        );
    }
}
