use crate::project::ProjectError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Extension of project bundle directories
pub const BUNDLE_EXTENSION: &str = "xcodeproj";

/// Locates the project bundle named by a command-line path
#[derive(Debug, Default)]
pub struct ProjectFinder;

impl ProjectFinder {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `path` to a bundle: either the bundle itself, or the single
    /// bundle directly inside a directory. No recursive search.
    pub fn locate(&self, path: &Path) -> Result<PathBuf, ProjectError> {
        if !path.exists() {
            return Err(ProjectError::NotFound {
                searched_directory: false,
            });
        }

        if is_bundle(path) {
            return Ok(path.to_path_buf());
        }

        if !path.is_dir() {
            return Err(ProjectError::Incompatible(format!(
                "{} is not a .{} bundle",
                path.display(),
                BUNDLE_EXTENSION
            )));
        }

        debug!("Searching for project bundles in: {}", path.display());
        let mut candidates: Vec<PathBuf> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|candidate| is_bundle(candidate))
            .collect();
        candidates.sort();
        trace!("Candidates: {:?}", candidates);

        match candidates.len() {
            0 => Err(ProjectError::NotFound {
                searched_directory: true,
            }),
            1 => Ok(candidates.remove(0)),
            _ => Err(ProjectError::NotSpecified(candidates)),
        }
    }
}

fn is_bundle(path: &Path) -> bool {
    path.is_dir() && path.extension().map(|e| e == BUNDLE_EXTENSION).unwrap_or(false)
}
