//! Strings Command
//!
//! Show the notable strings a package or entry file would contribute to a
//! fingerprint.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::analyzer::resolver::{ResolvedFiles, collect_imports};
use crate::analyzer::strings::{NotableStringSet, collect_notable_strings};
use crate::cli::output::Output;
use crate::config::Config;
use crate::corpus::collect_package_strings;
use crate::types::Result;

pub async fn run(config: &Config, path: &Path, unlimited: bool, format: &str) -> Result<()> {
    let out = Output::new();
    let limit = if unlimited {
        None
    } else {
        Some(config.fingerprint.string_limit)
    };

    let strings = match manifest_for(path) {
        Some(manifest) => {
            collect_package_strings(&manifest, config.fingerprint.main_only, limit).await?
        }
        None => entry_strings(path, limit).await?,
    };

    let list = strings.into_sorted_vec();
    info!(path = %path.display(), count = list.len(), "notable strings collected");

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&list)?),
        _ => {
            out.section(&format!("Notable strings from {}", path.display()));
            for s in &list {
                println!("  {}", s);
            }
        }
    }
    Ok(())
}

/// Treat directories and explicit manifests as package roots
fn manifest_for(path: &Path) -> Option<PathBuf> {
    if path.is_dir() {
        let manifest = path.join("package.json");
        return manifest.is_file().then_some(manifest);
    }
    (path.file_name().and_then(|n| n.to_str()) == Some("package.json"))
        .then(|| path.to_path_buf())
}

/// Walk one entry file's import graph and extract its notable strings
async fn entry_strings(entry: &Path, limit: Option<usize>) -> Result<NotableStringSet> {
    let base_dir = entry.parent().unwrap_or_else(|| Path::new("."));
    let file_name = entry
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| crate::types::ScopeError::resolve(entry.display().to_string(), base_dir.display().to_string(), "entry has no file name"))?;

    let seen: ResolvedFiles = Arc::new(DashMap::new());
    let scan = collect_imports(&format!("./{}", file_name), base_dir, seen).await;

    let mut strings = NotableStringSet::with_capacity(limit);
    for source in scan.internal.iter() {
        collect_notable_strings(source.value(), source.key(), &mut strings);
    }
    Ok(strings)
}
