//! Framework Detection
//!
//! Static analysis of fetched page sources: HTML and JS marker scans,
//! version-by-proximity heuristics, bundle classification, and the merge
//! rules that fold observations into one report per framework.

pub mod bundle;
pub mod heuristics;
pub mod merge;
pub mod static_scan;

pub use bundle::{BundleParser, is_bundled_file, is_bundled_file_strict};
pub use heuristics::scan_version_literals;
pub use merge::{merge_info, merge_outputs};
pub use static_scan::{
    handle_html, handle_js, is_html_url, is_js_url, is_likely_first_party, is_spa, scan,
};
