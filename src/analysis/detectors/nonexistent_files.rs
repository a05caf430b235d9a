use super::Detector;
use crate::analysis::{DefectKind, Findings, Progress};
use crate::project::Project;
use tracing::trace;

/// Reports file references whose resolved path is missing on disk
pub struct NonExistentFileDetector;

impl NonExistentFileDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for NonExistentFileDetector {
    fn kind(&self) -> DefectKind {
        DefectKind::NonExistentFiles
    }

    fn detect(&self, project: &Project, _progress: &dyn Progress) -> Findings {
        let cases = project
            .files()
            .iter()
            .filter(|file| !file.path.exists())
            .inspect(|file| trace!("Missing file: {}", file.path.display()))
            .map(|file| project.display(&file.path))
            .collect();
        Findings::new(cases)
    }
}

impl Default for NonExistentFileDetector {
    fn default() -> Self {
        Self::new()
    }
}
