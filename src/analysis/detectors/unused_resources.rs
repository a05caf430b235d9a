//! Unused resource detection
//!
//! ## Detection Algorithm
//!
//! 1. Collect candidates: build-member non-source files and the entries of
//!    member asset catalogs (see `analysis::resources`)
//! 2. Drop candidates the build uses on its own: the app icon, launch and main
//!    storyboards, and retained name patterns
//! 3. Search every scanned source file for the name variants of the
//!    candidates still alive; a match removes the candidate for good
//! 4. Whatever survives every file is reported, smallest first
//!
//! This is a text search. Names computed at runtime are not found, and a name
//! that merely appears in an unrelated string literal counts as a use.

use super::Detector;
use crate::analysis::resources::{self, Resource};
use crate::analysis::source_scan::{self, SourceFile};
use crate::analysis::{DefectKind, Findings, Progress};
use crate::config::ResourceConfig;
use crate::project::Project;
use bytesize::ByteSize;
use tracing::{debug, trace, warn};

pub struct UnusedResourceDetector {
    settings: ResourceConfig,
}

impl UnusedResourceDetector {
    pub fn new() -> Self {
        Self::with_config(ResourceConfig::default())
    }

    pub fn with_config(settings: ResourceConfig) -> Self {
        Self { settings }
    }

    /// Ignore names that only appear inside comments
    pub fn with_strip_comments(mut self, strip: bool) -> Self {
        self.settings.strip_comments = strip;
        self
    }

    /// Name patterns never reported
    pub fn with_retain(mut self, patterns: Vec<String>) -> Self {
        self.settings.retain = patterns;
        self
    }

    /// Resources the build references without any source mentioning them
    fn is_implicitly_used(&self, project: &Project, resource: &Resource) -> bool {
        if project.references_asset_as_app_icon(&resource.primary_name) {
            return true;
        }
        if resource.is_storyboard() && project.references_storyboard_as_entry_point(&resource.primary_name) {
            return true;
        }
        self.settings.should_retain(&resource.file_name) || self.settings.should_retain(&resource.primary_name)
    }

    /// Candidates no source file mentions
    pub fn unused_resources(&self, project: &Project, progress: &dyn Progress) -> Vec<Resource> {
        let candidates: Vec<Resource> = resources::collect_candidates(project)
            .into_iter()
            .filter(|resource| {
                let used = self.is_implicitly_used(project, resource);
                if used {
                    trace!("{} is used by the build itself", resource.file_name);
                }
                !used
            })
            .collect();

        let sources = source_scan::source_files(project);
        let total = sources.len();
        let mut alive = vec![true; candidates.len()];
        let mut remaining = candidates.len();

        for (processed, source) in sources.iter().enumerate() {
            let label = project.display(&source.path);
            progress.tick(processed, total, Some(label.as_str()));
            if remaining == 0 {
                continue;
            }

            let text = match source.read_contents() {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping unreadable source {}: {}", label, e);
                    continue;
                }
            };
            let text = source_scan::prepare(source, text, self.settings.strip_comments);

            for (index, resource) in candidates.iter().enumerate() {
                if !alive[index] || resource.path == source.path {
                    continue;
                }
                if self.mentions(source, &text, resource) {
                    trace!("{} referenced from {}", resource.file_name, label);
                    alive[index] = false;
                    remaining -= 1;
                }
            }
        }
        progress.tick(total, total, None);

        debug!("{} of {} candidate resources unreferenced", remaining, candidates.len());
        candidates
            .into_iter()
            .zip(alive)
            .filter_map(|(resource, alive)| alive.then_some(resource))
            .collect()
    }

    fn mentions(&self, source: &SourceFile, text: &str, resource: &Resource) -> bool {
        source.syntax.mentions(text, &resource.name_variants)
    }
}

impl Detector for UnusedResourceDetector {
    fn kind(&self) -> DefectKind {
        DefectKind::UnusedResources
    }

    fn detect(&self, project: &Project, progress: &dyn Progress) -> Findings {
        let mut unused: Vec<(u64, String)> = self
            .unused_resources(project, progress)
            .iter()
            .map(|resource| (resource.size(), project.display(&resource.path)))
            .collect();
        unused.sort();

        let total: u64 = unused.iter().map(|(size, _)| size).sum();
        let cases = unused
            .into_iter()
            .map(|(size, name)| format!("{} ({})", name, ByteSize(size)))
            .collect();

        Findings::new(cases)
            .presorted()
            .with_note(format!("total {}", ByteSize(total)))
    }
}

impl Default for UnusedResourceDetector {
    fn default() -> Self {
        Self::new()
    }
}
