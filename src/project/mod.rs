//! Project model
//!
//! A `Project` is built once from a project document and the directory that
//! contains the project bundle. All paths are resolved at construction time;
//! detectors only ever borrow the model.

mod error;
pub mod file_kind;
pub mod settings;

pub use error::ProjectError;
pub use file_kind::FileKind;
pub use settings::BuildSettings;

use crate::pbx::{self, Document, GroupKind, PathResolver};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Name of the document inside a project bundle
pub const DOCUMENT_NAME: &str = "project.pbxproj";

/// A file reference with its resolved location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileReference {
    pub id: String,
    pub path: PathBuf,
    pub declared_kind: Option<String>,
    pub kind: FileKind,
    pub has_target_membership: bool,
}

impl FileReference {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// A group (or variant group) of the project navigator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupReference {
    pub id: String,
    pub name: String,
    /// Location on disk; `None` when the group declares no path of its own
    pub directory: Option<PathBuf>,
    /// Location in the navigator hierarchy
    pub display_path: PathBuf,
    pub has_children: bool,
}

/// A native build target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductReference {
    pub id: String,
    pub name: String,
    pub builds_at_least_one_source: bool,
}

/// The resolved project graph
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    files: Vec<FileReference>,
    groups: Vec<GroupReference>,
    products: Vec<ProductReference>,
    settings: BuildSettings,
}

impl Project {
    /// Open a project bundle (the `.xcodeproj` directory)
    pub fn open(bundle: &Path) -> Result<Self, ProjectError> {
        let document_path = bundle.join(DOCUMENT_NAME);
        if !document_path.is_file() {
            return Err(ProjectError::Incompatible(format!(
                "{} does not contain {}",
                bundle.display(),
                DOCUMENT_NAME
            )));
        }
        let root = bundle
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let document = pbx::load_document(&document_path)?;
        Self::from_document(&document, &root)
    }

    /// Decode document contents and resolve them against `root`
    pub fn from_bytes(bytes: &[u8], root: &Path) -> Result<Self, ProjectError> {
        let value = pbx::decode(bytes)?;
        let document = Document::from_value(&value)?;
        Self::from_document(&document, root)
    }

    pub fn from_document(document: &Document, root: &Path) -> Result<Self, ProjectError> {
        let resolver = PathResolver::new(document, root);

        let mut files = Vec::new();
        for record in document.files() {
            let Some(path) = resolver.resolve(&record.id, &record.path, &record.source_tree)? else {
                trace!("Unresolvable file reference {} ({})", record.id, record.path);
                continue;
            };
            let kind = FileKind::classify(record.declared_kind.as_deref(), &path);
            if kind == FileKind::DataModel {
                continue;
            }
            files.push(FileReference {
                id: record.id.clone(),
                path,
                declared_kind: record.declared_kind.clone(),
                kind,
                has_target_membership: document.has_build_membership(&record.id),
            });
        }

        let mut groups = Vec::new();
        for record in document.groups() {
            if record.kind == GroupKind::Version {
                continue;
            }
            let directory = resolver.resolve_group(record)?;
            let name = record
                .name
                .clone()
                .or_else(|| record.path.clone())
                .unwrap_or_default();
            groups.push(GroupReference {
                id: record.id.clone(),
                name,
                directory,
                display_path: resolver.display_path(record),
                has_children: !record.children.is_empty(),
            });
        }

        let products = document
            .targets()
            .map(|target| ProductReference {
                id: target.id.clone(),
                name: target.name.clone(),
                builds_at_least_one_source: document.target_builds_sources(target),
            })
            .collect::<Vec<_>>();

        let settings = BuildSettings::new(
            document
                .build_configurations()
                .map(|c| c.settings.clone())
                .collect(),
        );

        debug!(
            "Project model: {} files, {} groups, {} targets",
            files.len(),
            groups.len(),
            products.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            files,
            groups,
            products,
            settings,
        })
    }

    /// Directory containing the project bundle
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[FileReference] {
        &self.files
    }

    pub fn groups(&self) -> &[GroupReference] {
        &self.groups
    }

    pub fn products(&self) -> &[ProductReference] {
        &self.products
    }

    pub fn references_asset_as_app_icon(&self, name: &str) -> bool {
        self.settings.references_app_icon(name)
    }

    pub fn references_property_list_as_info_plist(&self, file: &FileReference) -> bool {
        self.settings.references_info_plist(&file.path, &self.root)
    }

    /// Whether the asset catalog compiler includes the asset `name` on its own
    pub fn references_asset_in_catalog_settings(&self, name: &str) -> bool {
        self.settings.names(settings::CATALOG_ASSET_SETTINGS, name)
    }

    pub fn references_storyboard_as_entry_point(&self, name: &str) -> bool {
        self.settings.names(settings::STORYBOARD_SETTINGS, name)
    }

    /// Path relative to the project root when possible, for case strings
    pub fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}
