//! One detector per defect kind

mod corrupt_plists;
mod dangling_files;
mod empty_assets;
mod empty_groups;
mod empty_targets;
mod nonexistent_files;
mod nonexistent_paths;
mod unused_resources;

pub use corrupt_plists::CorruptPropertyListDetector;
pub use dangling_files::DanglingFileDetector;
pub use empty_assets::EmptyAssetDetector;
pub use empty_groups::EmptyGroupDetector;
pub use empty_targets::EmptyTargetDetector;
pub use nonexistent_files::NonExistentFileDetector;
pub use nonexistent_paths::NonExistentPathDetector;
pub use unused_resources::UnusedResourceDetector;

use crate::analysis::{DefectKind, Findings, Progress};
use crate::project::Project;

/// Trait for defect detectors
pub trait Detector: Send + Sync {
    /// The defect kind this detector reports
    fn kind(&self) -> DefectKind;

    /// Run the detector against the project
    fn detect(&self, project: &Project, progress: &dyn Progress) -> Findings;
}

/// Detector for `kind` with default settings
pub fn default_detector(kind: DefectKind) -> Box<dyn Detector> {
    match kind {
        DefectKind::NonExistentFiles => Box::new(NonExistentFileDetector::new()),
        DefectKind::NonExistentPaths => Box::new(NonExistentPathDetector::new()),
        DefectKind::EmptyGroups => Box::new(EmptyGroupDetector::new()),
        DefectKind::EmptyTargets => Box::new(EmptyTargetDetector::new()),
        DefectKind::DanglingFiles => Box::new(DanglingFileDetector::new()),
        DefectKind::CorruptPropertyLists => Box::new(CorruptPropertyListDetector::new()),
        DefectKind::EmptyAssets => Box::new(EmptyAssetDetector::new()),
        DefectKind::UnusedResources => Box::new(UnusedResourceDetector::new()),
    }
}
