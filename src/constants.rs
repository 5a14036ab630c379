//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Notable string fingerprinting constants
pub mod fingerprint {
    /// Minimum length for a string literal to count as a fingerprint.
    /// Shorter strings collide across unrelated packages far too often.
    pub const MIN_NOTABLE_STRING_LENGTH: usize = 20;

    /// Default cap on the number of notable strings kept per package version.
    /// When the cap is hit, the shortest member is evicted.
    pub const DEFAULT_NOTABLE_STRING_LIMIT: usize = 50;
}

/// Module resolution constants
pub mod resolver {
    /// File extensions probed, in order, when a specifier has none
    pub const EXTENSION_PROBE_ORDER: &[&str] = &["js", "json", "node", "mjs", "cjs", "ts", "tsx"];

    /// Index file names probed when a specifier resolves to a directory
    pub const INDEX_PROBE_ORDER: &[&str] = &["index.js", "index.json", "index.node", "index.ts"];

    /// Native addon extension; never opened or parsed
    pub const NATIVE_MODULE_EXTENSION: &str = "node";
}

/// Static detector constants
pub mod detector {
    /// Bytes of surrounding text inspected around a version-literal match
    pub const CONTEXT_LOOKAROUND_OFFSET: usize = 500;

    /// Files smaller than this are never considered bundles
    pub const MIN_BUNDLE_SIZE: usize = 1000;

    /// A large JS file with fewer lines than this is treated as minified
    pub const MINIFIED_LINE_THRESHOLD: usize = 10;
}

/// Package registry constants
pub mod registry {
    /// Default npm executable name
    pub const DEFAULT_NPM_BIN: &str = "npm";

    /// Prerelease markers filtered out of version listings by default
    pub const PRERELEASE_MARKERS: &[&str] = &["alpha", "beta", "rc"];
}
