//! Cross-Version Corpus Builder
//!
//! Turns a sequence of package releases into per-version string
//! fingerprints: sample versions from the registry listing, install each
//! into one disposable aliased workspace (sequentially; the installer
//! serializes), then collect strings for all installed versions in
//! parallel. Versions that fail to install are logged and skipped, never
//! fatal.

use futures::future::join_all;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::package::collect_package_strings;
use super::registry::PackageRegistry;
use super::workspace::Workspace;
use crate::constants::fingerprint::DEFAULT_NOTABLE_STRING_LIMIT;
use crate::constants::registry::PRERELEASE_MARKERS;
use crate::types::{Result, VersionCorpus};

pub struct CorpusBuilder<R: PackageRegistry> {
    registry: R,
    limit: Option<usize>,
    main_only: bool,
    ignore_prerelease: bool,
    keep_workspace: bool,
}

impl<R: PackageRegistry> CorpusBuilder<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            limit: Some(DEFAULT_NOTABLE_STRING_LIMIT),
            main_only: false,
            ignore_prerelease: true,
            keep_workspace: false,
        }
    }

    /// Cap on notable strings kept per version; `None` keeps everything
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Only walk the `main` entry point, ignoring the `exports` map
    pub fn main_only(mut self, main_only: bool) -> Self {
        self.main_only = main_only;
        self
    }

    /// Keep alpha/beta/rc releases in the sampled version list
    pub fn include_prerelease(mut self, include: bool) -> Self {
        self.ignore_prerelease = !include;
        self
    }

    /// Leave the install workspace on disk after the run
    pub fn keep_workspace(mut self, keep: bool) -> Self {
        self.keep_workspace = keep;
        self
    }

    /// Query the registry for versions to fingerprint.
    ///
    /// With `count`, every k-th release is taken from the chronological
    /// listing (k = total / count), spreading samples evenly across the
    /// package's history instead of clustering on old or new releases.
    pub async fn sample_versions(
        &self,
        package: &str,
        count: Option<usize>,
    ) -> Result<Vec<String>> {
        let mut versions = self.registry.list_versions(package).await?;
        if self.ignore_prerelease {
            versions.retain(|v| !PRERELEASE_MARKERS.iter().any(|m| v.contains(m)));
        }
        Ok(match count {
            Some(requested) => sample_every_kth(versions, requested),
            None => versions,
        })
    }

    /// Build the per-version fingerprint corpus.
    ///
    /// An empty `versions` list means "every published version" (minus the
    /// prerelease filter). The returned corpus lists only versions that
    /// actually installed, in attempt order.
    pub async fn build(&self, package: &str, versions: Vec<String>) -> Result<VersionCorpus> {
        let versions = if versions.is_empty() {
            self.sample_versions(package, None).await?
        } else {
            versions
        };

        let workspace = Workspace::create(self.keep_workspace)?;
        debug!("installing into workspace {}", workspace.path().display());

        let mut installed: Vec<String> = Vec::new();
        let mut install_dirs: Vec<(String, PathBuf)> = Vec::new();
        for version in &versions {
            match self
                .registry
                .install(package, version, workspace.path())
                .await
            {
                Ok(dir) => {
                    installed.push(version.clone());
                    install_dirs.push((version.clone(), dir));
                }
                Err(e) => warn!("skipping {}@{}: {}", package, version, e),
            }
        }

        // Disjoint filesystem subtrees and disjoint output keys: the
        // collection phase is safe to fan out across all versions at once.
        let scans = install_dirs.into_iter().map(|(version, dir)| {
            let manifest = dir.join("package.json");
            async move {
                let strings =
                    collect_package_strings(&manifest, self.main_only, self.limit).await;
                (version, strings)
            }
        });

        let mut corpus = VersionCorpus::new(package);
        corpus.version_order = installed;
        for (version, strings) in join_all(scans).await {
            let list = match strings {
                Ok(set) => set.into_sorted_vec(),
                Err(e) => {
                    // Installed but uncollectable: keep the version, record
                    // that it contributed nothing.
                    warn!("string collection failed for {}@{}: {}", package, version, e);
                    Vec::new()
                }
            };
            corpus.versions.insert(version, list);
        }

        if let Some(path) = workspace.finish() {
            info!("workspace kept at {}", path.display());
        }
        Ok(corpus)
    }
}

/// Every k-th element of `versions`, k = len / requested (floored).
/// Returns the full list when `requested` covers it already.
fn sample_every_kth(versions: Vec<String>, requested: usize) -> Vec<String> {
    if requested == 0 {
        return Vec::new();
    }
    if requested >= versions.len() {
        return versions;
    }
    let step = versions.len() / requested;
    let mut sampled = Vec::with_capacity(requested);
    let mut i = 0;
    while sampled.len() < requested && i < versions.len() {
        sampled.push(versions[i].clone());
        i += step;
    }
    sampled
}

// =============================================================================
// Tests
// =============================================================================
