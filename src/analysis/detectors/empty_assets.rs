use super::Detector;
use crate::analysis::{assets, DefectKind, Findings, Progress};
use crate::project::{FileKind, Project};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Reports asset catalog directories without content
pub struct EmptyAssetDetector;

impl EmptyAssetDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for EmptyAssetDetector {
    fn kind(&self) -> DefectKind {
        DefectKind::EmptyAssets
    }

    fn detect(&self, project: &Project, progress: &dyn Progress) -> Findings {
        let catalogs: BTreeSet<&PathBuf> = project
            .files()
            .iter()
            .filter(|file| file.kind == FileKind::AssetCatalog && file.path.is_dir())
            .map(|file| &file.path)
            .collect();

        let directories: BTreeSet<PathBuf> = catalogs
            .into_iter()
            .flat_map(|catalog| assets::metadata_directories(catalog))
            .collect();

        let total = directories.len();
        let mut cases = Vec::new();
        for (processed, directory) in directories.iter().enumerate() {
            let display = project.display(directory);
            progress.tick(processed, total, Some(display.as_str()));
            if assets::is_empty_asset(directory) {
                cases.push(display);
            }
        }
        progress.tick(total, total, None);

        Findings::new(cases)
    }
}

impl Default for EmptyAssetDetector {
    fn default() -> Self {
        Self::new()
    }
}
