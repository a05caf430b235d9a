//! Resources considered by the unused-resource detector
//!
//! Candidates are the build-member files that are not source code, plus the
//! individual entries of member asset catalogs. Each candidate carries every
//! name under which source code might refer to it.

use super::assets::{self, AssetEntry};
use super::fonts;
use crate::project::{FileKind, FileReference, Project};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// A candidate resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub path: PathBuf,
    /// Name without extension
    pub primary_name: String,
    pub file_name: String,
    pub kind: ResourceKind,
    pub name_variants: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    File(FileKind),
    Asset,
}

fn scale_suffix() -> &'static Regex {
    static SCALE: OnceLock<Regex> = OnceLock::new();
    SCALE.get_or_init(|| Regex::new(r"@\d+x").expect("scale suffix pattern is valid"))
}

/// Remove `@2x`-style scale suffixes
pub fn strip_scale_suffix(name: &str) -> String {
    scale_suffix().replace_all(name, "").to_string()
}

fn variants_of(names: &[&str]) -> BTreeSet<String> {
    let mut variants = BTreeSet::new();
    for name in names.iter().filter(|n| !n.is_empty()) {
        variants.insert(name.to_string());
        variants.insert(strip_scale_suffix(name));
    }
    variants.retain(|v| !v.is_empty());
    variants
}

impl Resource {
    pub fn from_file(path: &Path, kind: FileKind) -> Self {
        let primary_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut name_variants = variants_of(&[primary_name.as_str(), file_name.as_str()]);
        if kind == FileKind::Font {
            name_variants.extend(fonts::font_names(path));
        }

        Self {
            path: path.to_path_buf(),
            primary_name,
            file_name,
            kind: ResourceKind::File(kind),
            name_variants,
        }
    }

    pub fn from_asset(entry: &AssetEntry) -> Self {
        Self {
            path: entry.path.clone(),
            primary_name: entry.name.clone(),
            file_name: entry.file_name.clone(),
            kind: ResourceKind::Asset,
            name_variants: variants_of(&[entry.name.as_str(), entry.file_name.as_str()]),
        }
    }

    pub fn is_storyboard(&self) -> bool {
        self.kind == ResourceKind::File(FileKind::InterfaceBuilder)
            && self.path.extension().map(|e| e == "storyboard").unwrap_or(false)
    }

    /// Bytes on disk, summed recursively for directory resources
    pub fn size(&self) -> u64 {
        size_on_disk(&self.path)
    }
}

/// Total size of a file or directory tree; unreadable entries count as zero
pub fn size_on_disk(path: &Path) -> u64 {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta.len(),
        Ok(_) => WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.metadata().ok())
            .map(|meta| meta.len())
            .sum(),
        Err(e) => {
            debug!("Cannot size {}: {}", path.display(), e);
            0
        }
    }
}

fn is_hidden(file: &FileReference) -> bool {
    file.file_name().starts_with('.')
}

/// Candidate resources of the project, one per path
pub fn collect_candidates(project: &Project) -> Vec<Resource> {
    let mut by_path: BTreeMap<PathBuf, Resource> = BTreeMap::new();

    for file in project.files() {
        if !file.has_target_membership || !file.path.exists() {
            continue;
        }

        if file.kind == FileKind::AssetCatalog {
            for entry in assets::entries(&file.path) {
                if project.references_asset_in_catalog_settings(&entry.name) {
                    trace!("Asset {} is referenced by build settings", entry.name);
                    continue;
                }
                by_path
                    .entry(entry.path.clone())
                    .or_insert_with(|| Resource::from_asset(&entry));
            }
            continue;
        }

        if file.kind.is_source() || file.kind.is_excluded_resource() || is_hidden(file) {
            continue;
        }

        by_path
            .entry(file.path.clone())
            .or_insert_with(|| Resource::from_file(&file.path, file.kind));
    }

    debug!("{} candidate resources", by_path.len());
    by_path.into_values().collect()
}
