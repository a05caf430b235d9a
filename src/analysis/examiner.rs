use super::detectors::{default_detector, Detector, UnusedResourceDetector};
use super::{DefectKind, NoProgress, Progress};
use crate::config::Config;
use crate::project::Project;
use crate::report::Diagnosis;
use rayon::prelude::*;
use tracing::{debug, info};

/// Runs a set of detectors against a project
pub struct Examiner {
    detectors: Vec<Box<dyn Detector>>,
}

impl Examiner {
    /// Every detector with default settings
    pub fn new() -> Self {
        Self::with_detectors(DefectKind::ALL.iter().map(|&kind| default_detector(kind)).collect())
    }

    pub fn with_detectors(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    /// Detectors enabled by the configuration
    pub fn from_config(config: &Config) -> Self {
        let detectors = DefectKind::ALL
            .iter()
            .copied()
            .filter(|&kind| config.detection.is_enabled(kind))
            .map(|kind| match kind {
                DefectKind::UnusedResources => {
                    Box::new(UnusedResourceDetector::with_config(config.resources.clone())) as Box<dyn Detector>
                }
                other => default_detector(other),
            })
            .collect();
        Self::with_detectors(detectors)
    }

    pub fn kinds(&self) -> Vec<DefectKind> {
        self.detectors.iter().map(|d| d.kind()).collect()
    }

    /// Run detectors one after another, reporting progress to `progress`
    pub fn examine(&self, project: &Project, progress: &dyn Progress) -> Vec<Diagnosis> {
        let mut diagnoses = Vec::new();
        for detector in &self.detectors {
            let kind = detector.kind();
            info!("Checking {}...", kind);
            progress.start(kind);
            let findings = detector.detect(project, progress);
            progress.finish(kind);
            debug!("{}: {} cases", kind, findings.cases.len());
            diagnoses.extend(Diagnosis::from_findings(kind, findings));
        }
        diagnoses
    }

    /// Run detectors concurrently; progress is not reported
    pub fn examine_parallel(&self, project: &Project) -> Vec<Diagnosis> {
        let results: Vec<Option<Diagnosis>> = self
            .detectors
            .par_iter()
            .map(|detector| {
                let findings = detector.detect(project, &NoProgress);
                Diagnosis::from_findings(detector.kind(), findings)
            })
            .collect();
        results.into_iter().flatten().collect()
    }
}

impl Default for Examiner {
    fn default() -> Self {
        Self::new()
    }
}
