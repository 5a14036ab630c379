//! Package Registry Interface
//!
//! The npm listing/install mechanism is an external collaborator; this
//! module pins its interface behind [`PackageRegistry`] and ships the real
//! npm-CLI implementation. Tests (and any alternative ecosystem) provide
//! their own impl.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::constants::registry::DEFAULT_NPM_BIN;
use crate::types::{Result, ScopeError};

/// Version listing and per-version installation for one package ecosystem.
///
/// Contract notes: `install` places one version of `package` into
/// `workspace` and returns the directory containing its installed files
/// (where `package.json` lives). Installs for the same workspace are called
/// sequentially; the npm CLI takes a global lock anyway.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// All published versions, oldest first (registry order)
    async fn list_versions(&self, package: &str) -> Result<Vec<String>>;

    /// Install `package@version` into `workspace`; returns the install dir
    async fn install(&self, package: &str, version: &str, workspace: &Path) -> Result<PathBuf>;
}

/// Registry implementation shelling out to the npm CLI
pub struct NpmRegistry {
    npm_bin: String,
}

impl NpmRegistry {
    pub fn new() -> Self {
        Self {
            npm_bin: DEFAULT_NPM_BIN.to_string(),
        }
    }

    pub fn with_bin(npm_bin: impl Into<String>) -> Self {
        Self {
            npm_bin: npm_bin.into(),
        }
    }

    /// Directory-safe alias for installing many versions of one package
    /// side by side in a single node_modules layout. Scoped names swap the
    /// slash out so the alias stays a valid directory name.
    pub fn alias_for(package: &str, version: &str) -> String {
        format!("{}~{}", package.replace('/', "__"), version)
    }

    async fn run_npm(&self, args: &[&str], cwd: Option<&Path>) -> Result<String> {
        let mut cmd = Command::new(&self.npm_bin);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        debug!("running {} {}", self.npm_bin, args.join(" "));
        let output = cmd.output().await.map_err(|e| {
            ScopeError::Registry(format!(
                "failed to spawn {}: {}. Is npm installed?",
                self.npm_bin, e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScopeError::Registry(format!(
                "npm {} exited with {}: {}",
                args.first().unwrap_or(&""),
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for NpmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageRegistry for NpmRegistry {
    async fn list_versions(&self, package: &str) -> Result<Vec<String>> {
        let stdout = self
            .run_npm(&["view", package, "versions", "--json"], None)
            .await?;
        let value: Value = serde_json::from_str(stdout.trim())
            .map_err(|e| ScopeError::Registry(format!("unparseable npm view output: {}", e)))?;

        // npm prints a bare string when only one version exists
        let versions = match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Value::String(single) => vec![single],
            other => {
                return Err(ScopeError::Registry(format!(
                    "unexpected npm view output shape: {}",
                    other
                )));
            }
        };
        Ok(versions)
    }

    async fn install(&self, package: &str, version: &str, workspace: &Path) -> Result<PathBuf> {
        let alias = Self::alias_for(package, version);
        let spec = format!("{}@npm:{}@{}", alias, package, version);

        self.run_npm(
            &[
                "install",
                &spec,
                // Old releases love postinstall scripts that no longer build
                "--ignore-scripts",
                "--no-optional",
                "--no-audit",
                "--no-fund",
            ],
            Some(workspace),
        )
        .await
        .map_err(|e| ScopeError::install(package, version, e.to_string()))?;

        Ok(workspace.join("node_modules").join(alias))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_for_plain_package() {
        assert_eq!(NpmRegistry::alias_for("react", "16.8.0"), "react~16.8.0");
    }

    #[test]
    fn test_alias_for_scoped_package() {
        assert_eq!(
            NpmRegistry::alias_for("@angular/core", "11.2.4"),
            "@angular__core~11.2.4"
        );
    }
}
