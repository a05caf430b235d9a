use super::Detector;
use crate::analysis::{DefectKind, Findings, Progress};
use crate::project::Project;
use std::collections::BTreeSet;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Reports property lists on disk that fail to parse
pub struct CorruptPropertyListDetector;

impl CorruptPropertyListDetector {
    pub fn new() -> Self {
        Self
    }

    /// Parser diagnostic for an invalid property list; `None` when valid.
    /// Missing or unreadable files are left to other detectors.
    pub fn validate(path: &Path) -> Option<String> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Skipping unreadable property list {}: {}", path.display(), e);
                return None;
            }
        };

        // OpenStep, XML and binary are all detected by the reader
        match plist::Value::from_reader(Cursor::new(bytes)) {
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        }
    }
}

impl Detector for CorruptPropertyListDetector {
    fn kind(&self) -> DefectKind {
        DefectKind::CorruptPropertyLists
    }

    fn detect(&self, project: &Project, progress: &dyn Progress) -> Findings {
        let paths: BTreeSet<&Path> = project
            .files()
            .iter()
            .filter(|file| file.kind.is_property_list() && file.path.is_file())
            .map(|file| file.path.as_path())
            .collect();

        let total = paths.len();
        let mut cases = Vec::new();
        for (processed, path) in paths.into_iter().enumerate() {
            let shown = project.display(path);
            progress.tick(processed, total, Some(shown.as_str()));
            if let Some(message) = Self::validate(path) {
                debug!("Corrupt property list {}: {}", shown, message);
                let message = if message.is_empty() {
                    "unknown error".to_string()
                } else {
                    message
                };
                cases.push(format!("{} ({})", shown, message));
            }
        }
        progress.tick(total, total, None);

        Findings::new(cases)
    }
}

impl Default for CorruptPropertyListDetector {
    fn default() -> Self {
        Self::new()
    }
}
