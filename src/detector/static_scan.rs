//! Static Framework Scan
//!
//! State-free per call: classify each fetched source by URL shape, run the
//! matching handler, and accumulate observations into one output map.
//! Malformed URLs or mistyped content produce no signal, never an error.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::detector::bundle::is_bundled_file;
use crate::detector::heuristics::scan_version_literals;
use crate::detector::merge::merge_info;
use crate::types::{ConfidenceLevel, DetectorOutput, PageSource, SpaInfo, SpaType};

/// Angular emits its version straight into the DOM root element
/// (https://github.com/angular/angular/issues/16283)
static NG_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)ng-version=['"]([0-9.]+)['"]"#).expect("ng-version regex")
});

/// Legacy React server-render internals; only emitted before React 15
const REACT_SECRET_MARKER: &str = "__SECRET_DOM_DO_NOT_USE_OR_YOU_WILL_BE_FIRED";

/// Whether the URL names a JS payload (extension check on the path, which
/// sidesteps query strings and fragments)
pub fn is_js_url(file_url: &str) -> bool {
    match Url::parse(file_url) {
        Ok(url) => url.path().ends_with(".js") || url.path().ends_with(".mjs"),
        Err(_) => false,
    }
}

/// Whether the URL plausibly names an HTML document: explicit extension,
/// root-ish path, or an extensionless last path segment
pub fn is_html_url(file_url: &str) -> bool {
    let Ok(url) = Url::parse(file_url) else {
        return false;
    };
    let path = url.path();
    if path.ends_with(".html") || path.ends_with(".htm") {
        return true;
    }
    if path.ends_with('/') || path.is_empty() {
        return true;
    }
    match path.rsplit('/').next() {
        Some(last) => !last.contains('.'),
        None => false,
    }
}

/// Rough first-party test: does the URL mention the host's second-level
/// domain label?
pub fn is_likely_first_party(file_url: &str, hostname: &str) -> bool {
    let segments: Vec<&str> = hostname.split('.').collect();
    let host_id = if segments.len() >= 2 {
        segments[segments.len() - 2]
    } else {
        ""
    };
    !host_id.is_empty() && file_url.contains(host_id)
}

/// HTML evidence: `ng-version` (high confidence, versioned) and the legacy
/// React data attributes (medium, unversioned; both imply React < 15)
pub fn handle_html(output: &mut DetectorOutput, content: &str, file_url: &str) {
    if let Some(captures) = NG_VERSION_REGEX.captures(content)
        && let Some(version) = captures.get(1)
    {
        merge_info(
            output,
            SpaType::Angular,
            SpaInfo {
                version: Some(version.as_str().to_string()),
                reason_url: file_url.to_string(),
                confidence: ConfidenceLevel::High,
                is_static: true,
            },
        );
    }

    if content.contains("data-reactid") || content.contains("data-reactroot") {
        merge_info(
            output,
            SpaType::React,
            SpaInfo {
                version: None,
                reason_url: file_url.to_string(),
                confidence: ConfidenceLevel::Medium,
                is_static: true,
            },
        );
    }
}

/// JS evidence: the pre-15 React internal symbol, then the per-framework
/// version-by-proximity scan
pub fn handle_js(output: &mut DetectorOutput, content: &str, file_url: &str) {
    if content.contains(REACT_SECRET_MARKER) {
        merge_info(
            output,
            SpaType::React,
            SpaInfo {
                version: None,
                reason_url: file_url.to_string(),
                confidence: ConfidenceLevel::Medium,
                is_static: true,
            },
        );
    }

    scan_version_literals(output, content, file_url);
}

/// Site-level verdict: does this site run as a single-page app?
///
/// Requires framework evidence in `output` plus at least one JS source that
/// plausibly belongs to the site (first-party URL, or served via a CDN).
/// With `requires_bundle`, that JS source must additionally look like
/// bundler output. Inline JS in HTML never counts; an SPA ships its
/// application code as separate script files.
pub fn is_spa(
    sources: &[PageSource],
    hostname: &str,
    output: &DetectorOutput,
    requires_bundle: bool,
) -> bool {
    if output.is_empty() {
        return false;
    }
    sources.iter().any(|source| {
        is_js_url(&source.url)
            && (is_likely_first_party(&source.url, hostname) || source.url.contains("cdn"))
            && (!requires_bundle || is_bundled_file(&source.url, &source.content))
    })
}

/// Scan all of a site's fetched sources for framework evidence.
///
/// `_host` is the site hostname, reserved for first-party filtering via
/// [`is_likely_first_party`]; the scan currently inspects third-party
/// sources too.
pub fn scan(sources: &[PageSource], _host: &str) -> DetectorOutput {
    let mut output = DetectorOutput::new();
    for source in sources {
        if is_js_url(&source.url) {
            handle_js(&mut output, &source.content, &source.url);
        } else if is_html_url(&source.url) {
            handle_html(&mut output, &source.content, &source.url);
        }
        // Anything else (images, css, fonts) carries no textual signal
    }
    output
}

// =============================================================================
// Tests
// =============================================================================
