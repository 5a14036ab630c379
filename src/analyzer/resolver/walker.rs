//! Concurrent Import Graph Walker
//!
//! Discovers the transitive closure of same-package source files reachable
//! from an entry point. Relative specifiers are resolved and walked; bare
//! specifiers (npm packages, runtime builtins) are recorded as external
//! dependencies and never opened.
//!
//! The visited map is the sole synchronization point. Insertion happens
//! before a file's imports are parsed, and presence is re-checked between
//! reading a file and inserting it: two branches can race to the first
//! check, but only the first writer's content is stored and only the first
//! writer expands the file. The loser's read is discarded. Every concrete
//! path is therefore expanded at most once, which also terminates cyclic
//! import graphs.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::{BoxFuture, join_all};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

use super::node_resolve::resolve_module;
use crate::analyzer::parser::{self, Grammar};
use crate::constants::resolver::NATIVE_MODULE_EXTENSION;

/// Shared visited map: canonical path -> file content
pub type ResolvedFiles = Arc<DashMap<PathBuf, String>>;

/// Result of one resolution run
#[derive(Debug)]
pub struct ImportScan {
    /// All internal files reached, keyed by canonical path
    pub internal: ResolvedFiles,
    /// Bare specifiers referenced by any internal file
    pub external: BTreeSet<String>,
}

/// Whether a specifier stays inside the package
fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier == "."
        || specifier == ".."
}

/// Walk all files reachable from `entry`, accumulating into `seen`.
///
/// Pass a pre-populated map to continue a previous scan (a package with
/// several entry points shares one map so common files are parsed once).
/// Any error while resolving, reading, or parsing a file abandons only that
/// file's subtree; siblings already in flight are unaffected.
pub async fn collect_imports(entry: &str, base_dir: &Path, seen: ResolvedFiles) -> ImportScan {
    let external = Arc::new(DashMap::<String, ()>::new());
    walk(
        entry.to_string(),
        base_dir.to_path_buf(),
        seen.clone(),
        external.clone(),
    )
    .await;

    let external = external.iter().map(|e| e.key().clone()).collect();
    ImportScan {
        internal: seen,
        external,
    }
}

fn walk(
    specifier: String,
    base_dir: PathBuf,
    seen: ResolvedFiles,
    external: Arc<DashMap<String, ()>>,
) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        let resolved = match resolve_module(&specifier, &base_dir).await {
            Ok(path) => path,
            Err(e) => {
                debug!("skipping unresolvable import: {}", e);
                return;
            }
        };

        if seen.contains_key(&resolved) {
            return;
        }
        // Native addons are binary; .json is fine (its strings still count)
        if resolved.extension().and_then(|e| e.to_str()) == Some(NATIVE_MODULE_EXTENSION) {
            return;
        }

        let content = match fs::read_to_string(&resolved).await {
            Ok(content) => content,
            Err(e) => {
                debug!("skipping unreadable file {}: {}", resolved.display(), e);
                return;
            }
        };

        // Re-check under the entry lock: first writer wins the race window
        // between the check above and this insertion.
        match seen.entry(resolved.clone()) {
            Entry::Occupied(_) => return,
            Entry::Vacant(vacant) => {
                vacant.insert(content.clone());
            }
        }

        let sources = parser::import_sources(&content, Grammar::for_path(&resolved));
        let parent = resolved
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();

        let mut branches = Vec::new();
        for source in sources {
            if is_relative(&source) {
                branches.push(walk(
                    source,
                    parent.clone(),
                    seen.clone(),
                    external.clone(),
                ));
            } else {
                external.insert(source, ());
            }
        }
        join_all(branches).await;
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::strings::{NotableStringSet, collect_notable_strings};
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std_fs::create_dir_all(parent).unwrap();
        }
        std_fs::write(path, content).unwrap();
    }

    fn fresh_map() -> ResolvedFiles {
        Arc::new(DashMap::new())
    }

    #[tokio::test]
    async fn test_cycle_terminates_with_both_files() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.js",
            r#"require("./b"); require("lodash");"#,
        );
        write(
            tmp.path(),
            "b.js",
            r#"require("./a"); const marker = "twenty-five characters!!!";"#,
        );

        let scan = collect_imports("./a.js", tmp.path(), fresh_map()).await;

        assert_eq!(scan.internal.len(), 2);
        let keys: Vec<String> = scan
            .internal
            .iter()
            .map(|e| e.key().display().to_string())
            .collect();
        assert!(keys.iter().any(|k| k.ends_with("a.js")));
        assert!(keys.iter().any(|k| k.ends_with("b.js")));
        assert_eq!(scan.external, BTreeSet::from(["lodash".to_string()]));

        // The 25-char literal in b.js surfaces through the extractor
        let mut set = NotableStringSet::new();
        for entry in scan.internal.iter() {
            collect_notable_strings(entry.value(), entry.key(), &mut set);
        }
        assert!(set.contains("twenty-five characters!!!"));
    }

    #[tokio::test]
    async fn test_diamond_visits_each_file_once() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "entry.js", r#"require("./left"); require("./right");"#);
        write(tmp.path(), "left.js", r#"require("./shared");"#);
        write(tmp.path(), "right.js", r#"require("./shared");"#);
        write(tmp.path(), "shared.js", r#"require("os");"#);

        let scan = collect_imports("./entry.js", tmp.path(), fresh_map()).await;

        // 4 distinct files, not 5 import edges
        assert_eq!(scan.internal.len(), 4);
        assert_eq!(scan.external, BTreeSet::from(["os".to_string()]));
    }

    #[tokio::test]
    async fn test_broken_import_does_not_abort_siblings() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "entry.js",
            r#"require("./missing"); require("./ok");"#,
        );
        write(tmp.path(), "ok.js", "");

        let scan = collect_imports("./entry.js", tmp.path(), fresh_map()).await;
        assert_eq!(scan.internal.len(), 2);
    }

    #[tokio::test]
    async fn test_native_module_excluded() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "entry.js", r#"require("./addon.node");"#);
        write(tmp.path(), "addon.node", "\u{0}\u{1}binary");

        let scan = collect_imports("./entry.js", tmp.path(), fresh_map()).await;
        assert_eq!(scan.internal.len(), 1);
    }

    #[tokio::test]
    async fn test_shared_map_across_entry_points() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "one.js", r#"require("./shared");"#);
        write(tmp.path(), "two.js", r#"require("./shared");"#);
        write(tmp.path(), "shared.js", "");

        let seen = fresh_map();
        collect_imports("./one.js", tmp.path(), seen.clone()).await;
        let scan = collect_imports("./two.js", tmp.path(), seen.clone()).await;
        assert_eq!(scan.internal.len(), 3);
    }
}
