use super::Detector;
use crate::analysis::{DefectKind, Findings, Progress};
use crate::project::Project;

/// Reports targets whose sources phases compile nothing
pub struct EmptyTargetDetector;

impl EmptyTargetDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for EmptyTargetDetector {
    fn kind(&self) -> DefectKind {
        DefectKind::EmptyTargets
    }

    fn detect(&self, project: &Project, _progress: &dyn Progress) -> Findings {
        let cases = project
            .products()
            .iter()
            .filter(|product| !product.builds_at_least_one_source)
            .map(|product| product.name.clone())
            .collect();
        Findings::new(cases)
    }
}

impl Default for EmptyTargetDetector {
    fn default() -> Self {
        Self::new()
    }
}
