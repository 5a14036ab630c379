//! Node-Style Module Resolution
//!
//! Resolves a specifier to a concrete file the way Node's CommonJS loader
//! does: exact file, extension probing, then directory resolution through
//! `package.json` `main` and `index.*` fallbacks. Returned paths are
//! canonicalized so the visited map has one entry per concrete file
//! regardless of how it was reached.

use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::resolver::{EXTENSION_PROBE_ORDER, INDEX_PROBE_ORDER};
use crate::types::{Result, ScopeError};

/// Resolve `specifier` against `base_dir` to a canonical file path.
///
/// `specifier` is either a relative path (`./x`, `../x`, `.`, `..`) or an
/// absolute path (entry points). Bare specifiers never reach this function;
/// the walker records them as external dependencies instead.
pub async fn resolve_module(specifier: &str, base_dir: &Path) -> Result<PathBuf> {
    let candidate = if Path::new(specifier).is_absolute() {
        PathBuf::from(specifier)
    } else {
        base_dir.join(specifier)
    };

    if let Some(path) = resolve_as_file(&candidate).await {
        return canonical(&path).await;
    }
    if is_dir(&candidate).await
        && let Some(path) = resolve_as_directory(&candidate).await
    {
        return canonical(&path).await;
    }

    Err(ScopeError::resolve(
        specifier,
        base_dir.display().to_string(),
        "no matching file, extension probe, or directory index",
    ))
}

/// Exact file, then extension probing
async fn resolve_as_file(candidate: &Path) -> Option<PathBuf> {
    if is_file(candidate).await {
        return Some(candidate.to_path_buf());
    }
    let raw = candidate.as_os_str().to_string_lossy().into_owned();
    for ext in EXTENSION_PROBE_ORDER {
        let probed = PathBuf::from(format!("{}.{}", raw, ext));
        if is_file(&probed).await {
            return Some(probed);
        }
    }
    None
}

/// `package.json` `main`, then `index.*`
async fn resolve_as_directory(dir: &Path) -> Option<PathBuf> {
    let manifest = dir.join("package.json");
    if let Ok(raw) = fs::read_to_string(&manifest).await
        && let Ok(json) = serde_json::from_str::<serde_json::Value>(&raw)
        && let Some(main) = json.get("main").and_then(|m| m.as_str())
    {
        let target = dir.join(main);
        if let Some(path) = resolve_as_file(&target).await {
            return Some(path);
        }
        // `main` may name a directory holding its own index file
        if let Some(path) = resolve_index(&target).await {
            return Some(path);
        }
    }
    resolve_index(dir).await
}

async fn resolve_index(dir: &Path) -> Option<PathBuf> {
    for index in INDEX_PROBE_ORDER {
        let probed = dir.join(index);
        if is_file(&probed).await {
            return Some(probed);
        }
    }
    None
}

async fn canonical(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).await.map_err(|e| {
        ScopeError::resolve(
            path.display().to_string(),
            String::new(),
            format!("canonicalize failed: {}", e),
        )
    })
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
