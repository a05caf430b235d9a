//! Path resolution for file and group references
//!
//! A reference's `path` is interpreted relative to the base named by its
//! `sourceTree` anchor. Group-relative paths are assembled by walking up the
//! group hierarchy.

use super::document::{Document, GroupRecord};
use crate::project::ProjectError;
use std::path::{Path, PathBuf};

/// Anchor (`sourceTree`) of a path-bearing object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTree {
    /// `<group>`: relative to the enclosing group
    Group,
    /// `SOURCE_ROOT`: relative to the project root
    SourceRoot,
    /// `<absolute>`
    Absolute,
    /// SDK, developer or build-product locations we cannot see from here
    Unresolvable,
}

impl SourceTree {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "<group>" => Some(SourceTree::Group),
            "SOURCE_ROOT" => Some(SourceTree::SourceRoot),
            "<absolute>" => Some(SourceTree::Absolute),
            "" | "SDKROOT" | "DEVELOPER_DIR" | "BUILT_PRODUCTS_DIR" => Some(SourceTree::Unresolvable),
            _ => None,
        }
    }
}

fn parse_anchor(value: &str, id: &str) -> Result<SourceTree, ProjectError> {
    SourceTree::parse(value).ok_or_else(|| {
        ProjectError::Incompatible(format!("unknown sourceTree '{}' on object {}", value, id))
    })
}

/// Resolves reference paths against a project root directory
pub struct PathResolver<'a> {
    document: &'a Document,
    root: &'a Path,
}

impl<'a> PathResolver<'a> {
    pub fn new(document: &'a Document, root: &'a Path) -> Self {
        Self { document, root }
    }

    /// Resolve the object `id` declaring `path` under anchor `source_tree`.
    ///
    /// Returns `Ok(None)` when the anchor cannot be resolved on this machine,
    /// and an error when the anchor value is not one we know.
    pub fn resolve(&self, id: &str, path: &str, source_tree: &str) -> Result<Option<PathBuf>, ProjectError> {
        let assembled = match parse_anchor(source_tree, id)? {
            SourceTree::Unresolvable => return Ok(None),
            SourceTree::SourceRoot | SourceTree::Absolute => path.to_string(),
            SourceTree::Group => self.assemble_group_relative(id, path)?,
        };
        Ok(Some(self.anchor(&assembled)))
    }

    /// Prepend ancestor group paths until a boundary group is reached. Any
    /// ancestor anchored elsewhere than `<group>` is a boundary, and the
    /// assembled path is then taken relative to the project root.
    fn assemble_group_relative(&self, id: &str, path: &str) -> Result<String, ProjectError> {
        let mut current = path.to_string();

        for group in self.document.ancestors(id) {
            let anchor = match group.source_tree.as_deref() {
                Some(tree) => parse_anchor(tree, &group.id)?,
                None => SourceTree::Group,
            };
            if let Some(parent_path) = group.path.as_deref().filter(|p| !p.is_empty()) {
                current = join(parent_path, &current);
            }
            if anchor != SourceTree::Group {
                break;
            }
        }

        Ok(current)
    }

    fn anchor(&self, assembled: &str) -> PathBuf {
        let candidate = Path::new(assembled);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        }
    }

    /// Resolved on-disk directory of a group; `None` when the group has no own path
    pub fn resolve_group(&self, group: &GroupRecord) -> Result<Option<PathBuf>, ProjectError> {
        let Some(path) = group.path.as_deref().filter(|p| !p.is_empty()) else {
            return Ok(None);
        };
        let source_tree = group.source_tree.as_deref().unwrap_or("<group>");
        self.resolve(&group.id, path, source_tree)
    }

    /// Path of a group as shown in the project navigator: names (or paths) of
    /// the group and its ancestors, ignoring anchors
    pub fn display_path(&self, group: &GroupRecord) -> PathBuf {
        let mut components: Vec<&str> = Vec::new();
        components.extend(display_component(group));
        for ancestor in self.document.ancestors(&group.id) {
            components.extend(display_component(ancestor));
        }
        components.iter().rev().collect()
    }
}

fn display_component(group: &GroupRecord) -> Option<&str> {
    group
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .or_else(|| group.path.as_deref().filter(|p| !p.is_empty()))
}

fn join(parent: &str, child: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), child)
}
