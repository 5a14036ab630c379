//! Disposable Install Workspace
//!
//! One temporary directory per corpus-build run, exclusively owned for the
//! duration of the run and recursively removed when it finishes (unless the
//! caller asked to keep it for debugging).

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::types::{Result, ScopeError};

pub struct Workspace {
    dir: TempDir,
    keep: bool,
}

impl Workspace {
    /// Create a fresh workspace under the system temp directory
    pub fn create(keep: bool) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("bundlescope-")
            .tempdir()
            .map_err(|e| ScopeError::Workspace(format!("cannot create temp dir: {}", e)))?;
        Ok(Self { dir, keep })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Dispose of the workspace. Returns the persisted path when the
    /// workspace was created with `keep = true`.
    pub fn finish(self) -> Option<PathBuf> {
        if self.keep {
            Some(self.dir.keep())
        } else {
            None // dropped here; TempDir removes the tree
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
