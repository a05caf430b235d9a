use super::Detector;
use crate::analysis::{DefectKind, Findings, Progress};
use crate::project::Project;

/// Reports groups without children, by navigator path
pub struct EmptyGroupDetector;

impl EmptyGroupDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for EmptyGroupDetector {
    fn kind(&self) -> DefectKind {
        DefectKind::EmptyGroups
    }

    fn detect(&self, project: &Project, _progress: &dyn Progress) -> Findings {
        let cases = project
            .groups()
            .iter()
            .filter(|group| !group.has_children)
            .map(|group| group.display_path.to_string_lossy().to_string())
            .collect();
        Findings::new(cases)
    }
}

impl Default for EmptyGroupDetector {
    fn default() -> Self {
        Self::new()
    }
}
