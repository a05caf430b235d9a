//! Dangling source detection
//!
//! A source file that belongs to no target is never compiled. Headers are
//! exempt since they are pulled in by includes, and so is the Info.plist of a
//! target, which the build reads through a build setting instead.

use super::Detector;
use crate::analysis::{DefectKind, Findings, Progress};
use crate::project::{FileKind, FileReference, Project};

pub struct DanglingFileDetector;

impl DanglingFileDetector {
    pub fn new() -> Self {
        Self
    }

    fn is_dangling(&self, project: &Project, file: &FileReference) -> bool {
        if !file.kind.is_source() || file.kind.is_header() || file.has_target_membership {
            return false;
        }
        !(file.kind == FileKind::PropertyList && project.references_property_list_as_info_plist(file))
    }
}

impl Detector for DanglingFileDetector {
    fn kind(&self) -> DefectKind {
        DefectKind::DanglingFiles
    }

    fn detect(&self, project: &Project, _progress: &dyn Progress) -> Findings {
        let cases = project
            .files()
            .iter()
            .filter(|file| self.is_dangling(project, file))
            .map(|file| project.display(&file.path))
            .collect();
        Findings::new(cases)
    }
}

impl Default for DanglingFileDetector {
    fn default() -> Self {
        Self::new()
    }
}
