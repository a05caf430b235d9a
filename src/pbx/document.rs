//! Object graph loader
//!
//! Turns the `objects` table of a project document into typed records. Objects
//! of kinds we do not care about, and objects missing the fields their kind
//! requires, are dropped here so later stages only see well-formed records.

use crate::project::ProjectError;
use plist::{Dictionary, Value};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// A raw entry of the `objects` table
#[derive(Debug, Clone)]
pub struct RawObject {
    pub id: String,
    pub isa: String,
    pub properties: Dictionary,
}

impl RawObject {
    /// String-valued property. Unquoted numbers in OpenStep text decode as
    /// integers, so numeric scalars are accepted and rendered back.
    pub fn string(&self, key: &str) -> Option<String> {
        self.properties.get(key).and_then(scalar_string)
    }

    /// Array-of-strings property; non-scalar items are skipped
    pub fn strings(&self, key: &str) -> Option<Vec<String>> {
        self.properties
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(scalar_string).collect())
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(r) => Some(r.to_string()),
        _ => None,
    }
}

/// Kind of group-like container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Plain,
    Variant,
    /// Versioned data model container; walked through but never reported
    Version,
}

#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: String,
    pub path: String,
    pub source_tree: String,
    pub name: Option<String>,
    pub declared_kind: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub id: String,
    pub kind: GroupKind,
    pub path: Option<String>,
    pub name: Option<String>,
    pub source_tree: Option<String>,
    pub children: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TargetRecord {
    pub id: String,
    pub name: String,
    pub build_phases: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BuildConfigurationRecord {
    pub id: String,
    pub settings: Dictionary,
}

/// One classified object of the project document
#[derive(Debug, Clone)]
pub enum Record {
    File(FileRecord),
    Group(GroupRecord),
    /// `PBXBuildFile` linking a file or group into a build phase
    BuildFile { id: String, file_ref: String },
    BuildConfiguration(BuildConfigurationRecord),
    NativeTarget(TargetRecord),
    SourcesPhase { id: String, files: Vec<String> },
}

impl Record {
    /// Classify a raw object by its `isa`; `None` for ignored or malformed objects
    pub fn classify(raw: &RawObject) -> Option<Record> {
        let id = raw.id.clone();
        match raw.isa.as_str() {
            "PBXFileReference" => Some(Record::File(FileRecord {
                id,
                path: raw.string("path")?,
                source_tree: raw.string("sourceTree")?,
                name: raw.string("name"),
                declared_kind: raw
                    .string("lastKnownFileType")
                    .or_else(|| raw.string("explicitFileType")),
            })),
            "PBXGroup" | "PBXVariantGroup" | "XCVersionGroup" => {
                let kind = match raw.isa.as_str() {
                    "PBXGroup" => GroupKind::Plain,
                    "PBXVariantGroup" => GroupKind::Variant,
                    _ => GroupKind::Version,
                };
                Some(Record::Group(GroupRecord {
                    id,
                    kind,
                    path: raw.string("path"),
                    name: raw.string("name"),
                    source_tree: raw.string("sourceTree"),
                    children: raw.strings("children")?,
                }))
            }
            "PBXBuildFile" => Some(Record::BuildFile {
                id,
                file_ref: raw.string("fileRef")?,
            }),
            "XCBuildConfiguration" => Some(Record::BuildConfiguration(BuildConfigurationRecord {
                id,
                settings: raw
                    .properties
                    .get("buildSettings")
                    .and_then(Value::as_dictionary)
                    .cloned()
                    .unwrap_or_default(),
            })),
            "PBXNativeTarget" => Some(Record::NativeTarget(TargetRecord {
                id,
                name: raw.string("name")?,
                build_phases: raw.strings("buildPhases").unwrap_or_default(),
            })),
            "PBXSourcesBuildPhase" => Some(Record::SourcesPhase {
                id,
                files: raw.strings("files").unwrap_or_default(),
            }),
            _ => None,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::File(f) => &f.id,
            Record::Group(g) => &g.id,
            Record::BuildFile { id, .. } => id,
            Record::BuildConfiguration(c) => &c.id,
            Record::NativeTarget(t) => &t.id,
            Record::SourcesPhase { id, .. } => id,
        }
    }
}

/// The classified object graph of one project document
#[derive(Debug, Default)]
pub struct Document {
    records: Vec<Record>,
    index: HashMap<String, usize>,
    /// child id -> first group declaring it
    parents: HashMap<String, String>,
    /// ids appearing as `fileRef` of a build file
    build_members: HashSet<String>,
}

impl Document {
    /// Build a document from the decoded top-level value
    pub fn from_value(value: &Value) -> Result<Self, ProjectError> {
        let root = value
            .as_dictionary()
            .ok_or_else(|| ProjectError::Incompatible("top level is not a dictionary".to_string()))?;
        let objects = root
            .get("objects")
            .and_then(Value::as_dictionary)
            .ok_or_else(|| ProjectError::Incompatible("missing 'objects' table".to_string()))?;

        let mut raw_objects = Vec::with_capacity(objects.len());
        for (id, value) in objects.iter() {
            let Some(properties) = value.as_dictionary() else {
                trace!("Skipping non-dictionary object {}", id);
                continue;
            };
            let Some(isa) = properties.get("isa").and_then(Value::as_string) else {
                trace!("Skipping object {} without isa", id);
                continue;
            };
            raw_objects.push(RawObject {
                id: id.clone(),
                isa: isa.to_string(),
                properties: properties.clone(),
            });
        }

        Ok(Self::from_objects(raw_objects))
    }

    /// Classify raw objects and build the lookup indexes
    pub fn from_objects(objects: Vec<RawObject>) -> Self {
        let mut doc = Document::default();
        let mut dropped = 0usize;

        for raw in &objects {
            match Record::classify(raw) {
                Some(record) => {
                    doc.index.insert(record.id().to_string(), doc.records.len());
                    doc.records.push(record);
                }
                None => dropped += 1,
            }
        }

        for record in &doc.records {
            match record {
                Record::Group(group) => {
                    for child in &group.children {
                        doc.parents
                            .entry(child.clone())
                            .or_insert_with(|| group.id.clone());
                    }
                }
                Record::BuildFile { file_ref, .. } => {
                    doc.build_members.insert(file_ref.clone());
                }
                _ => {}
            }
        }

        debug!(
            "Loaded {} records ({} objects ignored or malformed)",
            doc.records.len(),
            dropped
        );
        doc
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn group(&self, id: &str) -> Option<&GroupRecord> {
        match self.get(id) {
            Some(Record::Group(group)) => Some(group),
            _ => None,
        }
    }

    /// Parent group of an object, if any group lists it as a child
    pub fn parent_of(&self, id: &str) -> Option<&GroupRecord> {
        self.parents.get(id).and_then(|parent| self.group(parent))
    }

    /// Ancestor groups from the direct parent upwards, stopping on cycles
    pub fn ancestors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a GroupRecord> + 'a {
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(id.to_string());
        let mut next = self.parent_of(id);
        std::iter::from_fn(move || {
            let current = next?;
            if !seen.insert(current.id.clone()) {
                return None;
            }
            next = self.parent_of(&current.id);
            Some(current)
        })
    }

    /// Whether the object or any of its ancestor groups is linked into a build phase
    pub fn has_build_membership(&self, id: &str) -> bool {
        self.build_members.contains(id)
            || self
                .ancestors(id)
                .any(|group| self.build_members.contains(&group.id))
    }

    pub fn files(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter().filter_map(|r| match r {
            Record::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = &GroupRecord> {
        self.records.iter().filter_map(|r| match r {
            Record::Group(g) => Some(g),
            _ => None,
        })
    }

    pub fn targets(&self) -> impl Iterator<Item = &TargetRecord> {
        self.records.iter().filter_map(|r| match r {
            Record::NativeTarget(t) => Some(t),
            _ => None,
        })
    }

    pub fn build_configurations(&self) -> impl Iterator<Item = &BuildConfigurationRecord> {
        self.records.iter().filter_map(|r| match r {
            Record::BuildConfiguration(c) => Some(c),
            _ => None,
        })
    }

    /// Whether any sources phase of the target lists at least one file
    pub fn target_builds_sources(&self, target: &TargetRecord) -> bool {
        target.build_phases.iter().any(|phase| {
            matches!(self.get(phase), Some(Record::SourcesPhase { files, .. }) if !files.is_empty())
        })
    }
}
