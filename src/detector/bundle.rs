//! Bundle Classification
//!
//! Decides whether a fetched JS file is a bundler artifact worth deeper
//! analysis. The lenient form uses URL and content shape alone; the strict
//! form gates the weakest signal (minification) behind a structural parse.

use url::Url;

use crate::constants::detector::{MIN_BUNDLE_SIZE, MINIFIED_LINE_THRESHOLD};
use crate::detector::static_scan::is_js_url;

/// Structural oracle for bundler output. Implementations parse the content
/// and report how many bundled modules they can see.
pub trait BundleParser {
    /// Number of distinct modules recognized inside `content`; zero means
    /// the parser found no bundle structure.
    fn module_count(&self, content: &str) -> usize;
}

/// Bundler naming conventions in the filename itself. Only the last path
/// segment counts; a `chunk` in the hostname or query string means nothing.
fn has_bundle_filename(file_url: &str) -> bool {
    let Ok(url) = Url::parse(file_url) else {
        return false;
    };
    let filename = url
        .path()
        .rsplit('/')
        .next()
        .unwrap_or("")
        .to_lowercase();
    filename.contains(".chunk")
        || filename.contains("chunk.")
        || filename.contains(".bundle")
        || filename.contains("bundle.")
}

/// Webpack runtime globals that survive minification
fn has_webpack_runtime(content: &str) -> bool {
    content.contains("webpackJsonp") || content.contains("webpackChunk")
}

/// Few lines relative to size reads as minified output
fn looks_minified(content: &str) -> bool {
    content.lines().count() < MINIFIED_LINE_THRESHOLD
}

/// Lenient bundle test: a JS URL, a non-trivial payload, and any one of
/// filename convention, webpack runtime marker, or minified shape.
pub fn is_bundled_file(file_url: &str, content: &str) -> bool {
    if !is_js_url(file_url) || content.len() < MIN_BUNDLE_SIZE {
        return false;
    }
    has_bundle_filename(file_url) || has_webpack_runtime(content) || looks_minified(content)
}

/// Strict bundle test: as [`is_bundled_file`], but the minification-only
/// path must be corroborated by the parser seeing at least one module.
/// Filename and runtime-marker evidence stand on their own.
pub fn is_bundled_file_strict<P: BundleParser>(
    file_url: &str,
    content: &str,
    parser: &P,
) -> bool {
    if !is_js_url(file_url) || content.len() < MIN_BUNDLE_SIZE {
        return false;
    }
    if has_bundle_filename(file_url) || has_webpack_runtime(content) {
        return true;
    }
    looks_minified(content) && parser.module_count(content) > 0
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedParser(usize);

    impl BundleParser for FixedParser {
        fn module_count(&self, _content: &str) -> usize {
            self.0
        }
    }

    fn minified_payload() -> String {
        // One long line, over the size floor
        format!("var x={};", "\"y\",".repeat(300))
    }

    fn multiline_payload() -> String {
        "var line = 1;\n".repeat(120)
    }

    #[test]
    fn test_small_files_rejected() {
        assert!(!is_bundled_file("https://x.test/main.chunk.js", "tiny"));
    }

    #[test]
    fn test_non_js_urls_rejected() {
        assert!(!is_bundled_file("https://x.test/styles.css", &minified_payload()));
    }

    #[test]
    fn test_chunk_filename_accepted() {
        assert!(is_bundled_file(
            "https://x.test/static/js/2.f3ab11.chunk.js",
            &multiline_payload()
        ));
    }

    #[test]
    fn test_webpack_runtime_accepted() {
        let content = format!("{}window.webpackJsonp=window.webpackJsonp||[];", multiline_payload());
        assert!(is_bundled_file("https://x.test/app.js", &content));
    }

    #[test]
    fn test_minified_shape_accepted() {
        assert!(is_bundled_file("https://x.test/app.js", &minified_payload()));
    }

    #[test]
    fn test_plain_multiline_js_rejected() {
        assert!(!is_bundled_file("https://x.test/app.js", &multiline_payload()));
    }

    #[test]
    fn test_marker_in_hostname_does_not_count() {
        let content = multiline_payload();
        assert!(!is_bundled_file("https://chunk.example.test/app.js", &content));
        assert!(!is_bundled_file_strict(
            "https://chunk.example.test/app.js",
            &content,
            &FixedParser(0)
        ));
    }

    #[test]
    fn test_marker_in_query_string_does_not_count() {
        assert!(!is_bundled_file(
            "https://x.test/app.js?cb=bundle.123",
            &multiline_payload()
        ));
    }

    #[test]
    fn test_marker_in_directory_segment_does_not_count() {
        // The convention applies to the filename, not a parent directory
        assert!(!is_bundled_file(
            "https://x.test/bundle.d/app.js",
            &multiline_payload()
        ));
    }

    #[test]
    fn test_strict_requires_modules_for_minified_only() {
        let content = minified_payload();
        assert!(!is_bundled_file_strict("https://x.test/app.js", &content, &FixedParser(0)));
        assert!(is_bundled_file_strict("https://x.test/app.js", &content, &FixedParser(3)));
    }

    #[test]
    fn test_strict_filename_evidence_skips_parser() {
        // Parser sees nothing, but the filename convention is decisive
        assert!(is_bundled_file_strict(
            "https://x.test/vendor.bundle.js",
            &multiline_payload(),
            &FixedParser(0)
        ));
    }
}
