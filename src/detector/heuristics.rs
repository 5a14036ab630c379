//! Framework Version Heuristics
//!
//! Version extraction by proximity: a per-framework regex finds quoted
//! semver-shaped literals plausible for that framework, and a fixed window
//! of surrounding text must contain corroborating framework tokens before
//! the match counts. React and Vue accept any single nearby token; the
//! AngularJS version object reliably emits all of its fields adjacently, so
//! AngularJS requires every token. The asymmetry is deliberate.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::detector::CONTEXT_LOOKAROUND_OFFSET;
use crate::detector::merge::merge_info;
use crate::types::{ConfidenceLevel, DetectorOutput, SpaInfo, SpaType};

/// Nearby-token confirmation rule for one framework
#[derive(Debug, Clone, Copy)]
pub enum Confirmation {
    /// One nearby token suffices
    AnyOf(&'static [&'static str]),
    /// Every token must appear in the window
    AllOf(&'static [&'static str]),
}

impl Confirmation {
    /// Case-insensitive containment test over the confirmation window
    pub fn confirms(&self, window: &str) -> bool {
        let window = window.to_lowercase();
        match self {
            Self::AnyOf(tokens) => tokens
                .iter()
                .any(|t| window.contains(&t.to_lowercase())),
            Self::AllOf(tokens) => tokens
                .iter()
                .all(|t| window.contains(&t.to_lowercase())),
        }
    }
}

pub struct FrameworkSignature {
    pub spa_type: SpaType,
    pub version_regex: Regex,
    pub confirmation: Confirmation,
}

/// React internals that survive minification. A match may come from React
/// or ReactDOM; either is fine.
const REACT_TOKENS: &[&str] = &[
    // Lifecycle names
    "componentDidMount",
    "componentWillMount",
    // Hooks
    "useState",
    "useEffect",
    // Secret internals
    "DO_NOT_USE_OR_YOU_WILL_BE_FIRED",
    // Renderer details exposed to devtools
    "rendererPackageName",
];

/// Vue 2 runtime identifiers commonly present near `Vue.version`
const VUE_TOKENS: &[&str] = &["$isServer", "_isVue", "$scopedSlots"];

/// Fields of the `angular.version` object; all five are emitted together
const ANGULARJS_TOKENS: &[&str] = &["full", "major", "minor", "dot", "codeName"];

static SIGNATURES: LazyLock<Vec<FrameworkSignature>> = LazyLock::new(|| {
    vec![
        // React majors: 0.x (pre-15 era) or 10-17; must be quote-wrapped
        FrameworkSignature {
            spa_type: SpaType::React,
            version_regex: Regex::new(r#"["'`]((?:0|1[0-7])\.[0-9]+\.[0-9]+[^"'`]*)["'`]"#)
                .expect("react version regex"),
            confirmation: Confirmation::AnyOf(REACT_TOKENS),
        },
        // Vue major 2 only
        FrameworkSignature {
            spa_type: SpaType::Vue,
            version_regex: Regex::new(r#"["'`](2\.[0-9]+\.[0-9]+[^"'`]*)["'`]"#)
                .expect("vue version regex"),
            confirmation: Confirmation::AnyOf(VUE_TOKENS),
        },
        // AngularJS major 1 only
        FrameworkSignature {
            spa_type: SpaType::AngularJs,
            version_regex: Regex::new(r#"["'`](1\.[0-9]+\.[0-9]+[^"'`]*)["'`]"#)
                .expect("angularjs version regex"),
            confirmation: Confirmation::AllOf(ANGULARJS_TOKENS),
        },
    ]
});

/// The per-framework signature table
pub fn signatures() -> &'static [FrameworkSignature] {
    &SIGNATURES
}

/// Slice the confirmation window around a match, clamped to char boundaries
fn context_window(content: &str, start: usize, end: usize) -> &str {
    let mut lo = start.saturating_sub(CONTEXT_LOOKAROUND_OFFSET);
    while lo > 0 && !content.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + CONTEXT_LOOKAROUND_OFFSET).min(content.len());
    while hi < content.len() && !content.is_char_boundary(hi) {
        hi += 1;
    }
    &content[lo..hi]
}

/// Scan JS content for framework-plausible version literals confirmed by
/// nearby tokens. The first confirmed match per framework (in document
/// order) wins and is reported at Medium confidence.
pub fn scan_version_literals(output: &mut DetectorOutput, content: &str, file_url: &str) {
    for signature in signatures() {
        for captures in signature.version_regex.captures_iter(content) {
            let Some(version) = captures.get(1) else {
                continue;
            };
            let whole = captures.get(0).map(|m| (m.start(), m.end()));
            let Some((start, end)) = whole else { continue };

            let window = context_window(content, start, end);
            if signature.confirmation.confirms(window) {
                merge_info(
                    output,
                    signature.spa_type,
                    SpaInfo {
                        version: Some(version.as_str().to_string()),
                        reason_url: file_url.to_string(),
                        confidence: ConfidenceLevel::Medium,
                        is_static: true,
                    },
                );
                break;
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
