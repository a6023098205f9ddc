//! # Filesystem Bundle Assets
//!
//! Reads assets from the directory the host deployed the add-on bundle to.

use std::io;
use std::path::{Component, Path, PathBuf};

use shared_types::HostError;
use tracing::debug;

use crate::ports::AssetReader;

/// Asset reader rooted at the deployed bundle directory.
#[derive(Debug, Clone)]
pub struct FsBundleAssets {
    root: PathBuf,
}

impl FsBundleAssets {
    /// Create a reader for the bundle deployed at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Bundle root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetReader for FsBundleAssets {
    fn read_asset(&self, relative_path: &Path) -> Result<Vec<u8>, HostError> {
        // Assets must stay inside the bundle.
        let escapes = relative_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(HostError::new(
                "invalid_asset_path",
                format!("{} is not a bundle-relative path", relative_path.display()),
            ));
        }

        let path = self.root.join(relative_path);
        debug!(path = %path.display(), "Reading bundle asset");

        std::fs::read(&path).map_err(|e| {
            let code = match e.kind() {
                io::ErrorKind::NotFound => "not_found",
                io::ErrorKind::PermissionDenied => "permission_denied",
                _ => "io_error",
            };
            HostError::new(code, format!("{}: {e}", path.display()))
        })
    }
}
