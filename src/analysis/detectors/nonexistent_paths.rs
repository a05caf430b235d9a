use super::Detector;
use crate::analysis::{DefectKind, Findings, Progress};
use crate::project::Project;

/// Reports groups pointing at a directory that does not exist.
///
/// Groups without a path of their own cannot be checked and are skipped.
pub struct NonExistentPathDetector;

impl NonExistentPathDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for NonExistentPathDetector {
    fn kind(&self) -> DefectKind {
        DefectKind::NonExistentPaths
    }

    fn detect(&self, project: &Project, _progress: &dyn Progress) -> Findings {
        let cases = project
            .groups()
            .iter()
            .filter_map(|group| group.directory.as_ref())
            .filter(|directory| !directory.exists())
            .map(|directory| project.display(directory))
            .collect();
        Findings::new(cases)
    }
}

impl Default for NonExistentPathDetector {
    fn default() -> Self {
        Self::new()
    }
}
