use std::collections::HashSet;
use url::Url;

/// Reduces raw anchor candidates to fetchable absolute HTTP(S) URLs.
///
/// Anchor sets scraped from arbitrary pages are noisy: empty hrefs,
/// relative paths, `javascript:` pseudo-links, duplicates. Anything not
/// unambiguously fetchable is dropped rather than reported, because a bad
/// pick later aborts the whole step. Duplicates are removed on exact
/// string match and first-occurrence order is preserved; survivors are
/// returned as-is, not normalized.
pub fn filter_links<I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for candidate in candidates {
        if !is_fetchable(&candidate) {
            continue;
        }
        if seen.insert(candidate.clone()) {
            links.push(candidate);
        }
    }

    links
}

fn is_fetchable(candidate: &str) -> bool {
    if !candidate.starts_with("http://") && !candidate.starts_with("https://") {
        return false;
    }
    // Rejects scheme-only strings like "https://" (empty host)
    Url::parse(candidate).is_ok()
}
