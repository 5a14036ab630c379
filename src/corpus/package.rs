//! Single-Version Package Collection
//!
//! Resolves one installed package's declared entry points (`main`, and the
//! `exports` map unless restricted) through the source graph walker, then
//! distills every resolved file into a shared notable-string set. Only files
//! reachable from the declared entries count: tests, tooling, and
//! node_modules never enter the fingerprint.

use dashmap::DashMap;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

use crate::analyzer::resolver::{ResolvedFiles, collect_imports};
use crate::analyzer::strings::{NotableStringSet, collect_notable_strings};
use crate::types::{Result, ScopeError};

/// Collect all source files reachable from a package's entry points.
///
/// One shared visited map is threaded through every entry point, so a file
/// reachable from both `main` and an `exports` target is read and parsed
/// once. Entry points that fail to resolve contribute nothing.
pub async fn collect_source_files(manifest_path: &Path, main_only: bool) -> Result<ResolvedFiles> {
    let raw = fs::read_to_string(manifest_path).await.map_err(|e| {
        ScopeError::manifest(manifest_path.display().to_string(), e.to_string())
    })?;
    let manifest: Value = serde_json::from_str(&raw).map_err(|e| {
        ScopeError::manifest(manifest_path.display().to_string(), e.to_string())
    })?;
    let package_dir = manifest_path
        .parent()
        .ok_or_else(|| {
            ScopeError::manifest(
                manifest_path.display().to_string(),
                "manifest has no parent directory",
            )
        })?
        .to_path_buf();

    let seen: ResolvedFiles = Arc::new(DashMap::new());

    if let Some(main) = manifest.get("main").and_then(|m| m.as_str()) {
        collect_imports(main, &package_dir, seen.clone()).await;
    }

    if !main_only
        && let Some(exports) = manifest.get("exports")
    {
        let mut targets = Vec::new();
        flatten_export_targets(exports, &mut targets);
        for target in targets {
            collect_imports(&target, &package_dir, seen.clone()).await;
        }
    }

    debug!(
        "collected {} source files from {}",
        seen.len(),
        manifest_path.display()
    );
    Ok(seen)
}

/// Flatten an `exports` value to its string leaves.
///
/// Handles the plain-string form, the subpath map, and nested condition
/// objects (`import`/`require`/`default`). Non-string leaves are ignored.
fn flatten_export_targets(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(target) => out.push(target.clone()),
        Value::Object(map) => {
            for nested in map.values() {
                flatten_export_targets(nested, out);
            }
        }
        Value::Array(items) => {
            for nested in items {
                flatten_export_targets(nested, out);
            }
        }
        _ => {}
    }
}

/// Collect a package's notable strings into one capacity-bounded set.
/// `limit = None` keeps everything.
pub async fn collect_package_strings(
    manifest_path: &Path,
    main_only: bool,
    limit: Option<usize>,
) -> Result<NotableStringSet> {
    let sources = collect_source_files(manifest_path, main_only).await?;
    let mut strings = NotableStringSet::with_capacity(limit);
    for entry in sources.iter() {
        collect_notable_strings(entry.value(), entry.key(), &mut strings);
    }
    Ok(strings)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std_fs::create_dir_all(parent).unwrap();
        }
        std_fs::write(path, content).unwrap();
    }

    fn fixture_package(tmp: &TempDir) -> std::path::PathBuf {
        write(
            tmp.path(),
            "package.json",
            r#"{
                "name": "fixture",
                "main": "lib/index.js",
                "exports": {
                    ".": "./lib/index.js",
                    "./extra": { "require": "./lib/extra.js" }
                }
            }"#,
        );
        write(
            tmp.path(),
            "lib/index.js",
            r#"require("./util"); module.exports = "the primary fixture entry point";"#,
        );
        write(
            tmp.path(),
            "lib/util.js",
            r#"exports.tag = "an identifying utility string";"#,
        );
        write(
            tmp.path(),
            "lib/extra.js",
            r#"exports.extra = "only reachable through exports map";"#,
        );
        write(
            tmp.path(),
            "test/spec.js",
            r#"require("../lib/index"); const t = "test-only string never collected";"#,
        );
        tmp.path().join("package.json")
    }

    #[tokio::test]
    async fn test_collects_main_and_exports_closure() {
        let tmp = TempDir::new().unwrap();
        let manifest = fixture_package(&tmp);

        let sources = collect_source_files(&manifest, false).await.unwrap();
        assert_eq!(sources.len(), 3);
        let keys: Vec<String> = sources.iter().map(|e| e.key().display().to_string()).collect();
        assert!(!keys.iter().any(|k| k.contains("spec.js")));
    }

    #[tokio::test]
    async fn test_main_only_skips_exports() {
        let tmp = TempDir::new().unwrap();
        let manifest = fixture_package(&tmp);

        let sources = collect_source_files(&manifest, true).await.unwrap();
        let keys: Vec<String> = sources.iter().map(|e| e.key().display().to_string()).collect();
        assert!(!keys.iter().any(|k| k.contains("extra.js")));
    }

    #[tokio::test]
    async fn test_package_strings() {
        let tmp = TempDir::new().unwrap();
        let manifest = fixture_package(&tmp);

        let strings = collect_package_strings(&manifest, false, None).await.unwrap();
        assert!(strings.contains("the primary fixture entry point"));
        assert!(strings.contains("an identifying utility string"));
        assert!(strings.contains("only reachable through exports map"));
        assert!(!strings.contains("test-only string never collected"));
    }

    #[tokio::test]
    async fn test_missing_manifest_errors() {
        let tmp = TempDir::new().unwrap();
        let err = collect_package_strings(&tmp.path().join("package.json"), false, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ScopeError::Manifest { .. }));
    }

    #[test]
    fn test_flatten_nested_conditions() {
        let exports: Value = serde_json::from_str(
            r#"{
                ".": { "import": "./esm/index.mjs", "default": "./cjs/index.js" },
                "./sub": ["./sub/a.js", { "require": "./sub/b.js" }],
                "./flag": true
            }"#,
        )
        .unwrap();
        let mut targets = Vec::new();
        flatten_export_targets(&exports, &mut targets);
        targets.sort();
        assert_eq!(
            targets,
            vec!["./cjs/index.js", "./esm/index.mjs", "./sub/a.js", "./sub/b.js"]
        );
    }
}
