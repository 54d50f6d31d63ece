use driftwalk_walker::WalkReport;

/// Renders a finished walk as a human-readable trail report.
pub fn generate_walk_report(report: &WalkReport) -> String {
    let mut out = String::new();
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    out.push_str("# Summary:\n");
    out.push_str(&format!("  Seed: {}\n", report.seed));
    out.push_str(&format!("  Max depth: {}\n", report.max_depth));
    out.push_str(&format!("  Pages rendered: {}\n", report.pages_rendered()));
    out.push_str(&format!("  Stopped: {}\n", report.stopped.describe()));

    out.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    out.push_str("# Trail:\n");

    for step in &report.steps {
        let mut line = format!(
            "  [depth {}] {} ({} links)",
            step.depth, step.url, step.links_found
        );
        if let Some(ref chosen) = step.chosen {
            line.push_str(&format!(" -> {chosen}"));
        }
        out.push_str(&line);
        out.push('\n');
    }

    // A render failure never produces a step record, so name the page here
    if let driftwalk_walker::StopReason::RenderFailed { url, message } = &report.stopped {
        out.push_str(&format!("  [failed] {url}: {message}\n"));
    }

    out
}
