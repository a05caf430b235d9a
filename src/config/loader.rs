use crate::analysis::DefectKind;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for pbxlint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which defect kinds to look for
    pub detection: DetectionConfig,

    /// Unused resource search settings
    pub resources: ResourceConfig,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub nonexistent_files: bool,
    pub nonexistent_paths: bool,
    pub empty_groups: bool,
    pub empty_targets: bool,
    pub dangling_files: bool,
    pub corrupt_plists: bool,
    pub empty_assets: bool,
    pub unused_resources: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Ignore names that only appear inside comments
    pub strip_comments: bool,

    /// Patterns to retain - never report as unused
    pub retain: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            nonexistent_files: true,
            nonexistent_paths: true,
            empty_groups: true,
            empty_targets: true,
            dangling_files: true,
            corrupt_plists: true,
            empty_assets: true,
            unused_resources: true,
        }
    }
}

impl DetectionConfig {
    fn flag(&mut self, kind: DefectKind) -> &mut bool {
        match kind {
            DefectKind::NonExistentFiles => &mut self.nonexistent_files,
            DefectKind::NonExistentPaths => &mut self.nonexistent_paths,
            DefectKind::EmptyGroups => &mut self.empty_groups,
            DefectKind::EmptyTargets => &mut self.empty_targets,
            DefectKind::DanglingFiles => &mut self.dangling_files,
            DefectKind::CorruptPropertyLists => &mut self.corrupt_plists,
            DefectKind::EmptyAssets => &mut self.empty_assets,
            DefectKind::UnusedResources => &mut self.unused_resources,
        }
    }

    pub fn is_enabled(&self, kind: DefectKind) -> bool {
        match kind {
            DefectKind::NonExistentFiles => self.nonexistent_files,
            DefectKind::NonExistentPaths => self.nonexistent_paths,
            DefectKind::EmptyGroups => self.empty_groups,
            DefectKind::EmptyTargets => self.empty_targets,
            DefectKind::DanglingFiles => self.dangling_files,
            DefectKind::CorruptPropertyLists => self.corrupt_plists,
            DefectKind::EmptyAssets => self.empty_assets,
            DefectKind::UnusedResources => self.unused_resources,
        }
    }

    pub fn set(&mut self, kind: DefectKind, enabled: bool) {
        *self.flag(kind) = enabled;
    }

    /// Enable exactly the given kinds
    pub fn only(&mut self, kinds: &[DefectKind]) {
        for kind in DefectKind::ALL {
            self.set(kind, kinds.contains(&kind));
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            strip_comments: true,
            retain: vec![],
        }
    }
}

impl ResourceConfig {
    /// Whether a resource name is covered by a retain pattern
    pub fn should_retain(&self, name: &str) -> bool {
        self.retain.iter().any(|p| glob_match(p, name))
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(directory: &Path) -> Result<Self> {
        let default_names = [
            ".pbxlint.yml",
            ".pbxlint.yaml",
            ".pbxlint.toml",
            "pbxlint.yml",
            "pbxlint.yaml",
            "pbxlint.toml",
        ];

        for name in &default_names {
            let path = directory.join(name);
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}

/// Wildcard matching where `*` matches any run of characters and `?` matches
/// exactly one, e.g. "Launch*" or "*@3x.png"
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // Position of the last `*` and the text index it was tried at
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, at)) => {
                    p = star + 1;
                    t = at + 1;
                    backtrack = Some((star, at + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
