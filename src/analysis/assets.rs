//! Asset catalog layout
//!
//! Every directory of an asset catalog carries a `Contents.json`. Named
//! entries (`*.imageset`, `*.colorset`, ...) are the directories with an
//! extension; plain folders only group entries.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

pub const METADATA_FILE: &str = "Contents.json";

/// A named entry of an asset catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub path: PathBuf,
    /// Name used to load the asset, e.g. `icon` for `icon.imageset`
    pub name: String,
    /// Directory name including the extension
    pub file_name: String,
}

fn has_metadata(dir: &Path) -> bool {
    dir.join(METADATA_FILE).is_file()
}

/// Named entries of `catalog`; entries are not descended into
pub fn entries(catalog: &Path) -> Vec<AssetEntry> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(catalog).min_depth(1).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        let (Some(stem), Some(_)) = (path.file_stem(), path.extension()) else {
            continue;
        };
        if has_metadata(path) {
            found.push(AssetEntry {
                path: path.to_path_buf(),
                name: stem.to_string_lossy().to_string(),
                file_name: entry.file_name().to_string_lossy().to_string(),
            });
        }
        walker.skip_current_dir();
    }

    trace!("{} entries in {}", found.len(), catalog.display());
    found
}

/// Every directory of `catalog` (the catalog included) that carries metadata
pub fn metadata_directories(catalog: &Path) -> Vec<PathBuf> {
    WalkDir::new(catalog)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir() && has_metadata(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

/// Whether an asset directory holds nothing but its metadata, or is a color
/// set that defines no color. Color sets keep their color inside the
/// metadata, so only their components are checked.
pub fn is_empty_asset(dir: &Path) -> bool {
    if dir.extension().map(|e| e == "colorset").unwrap_or(false) {
        return !color_set_defines_color(dir);
    }

    match fs::read_dir(dir) {
        Ok(entries) => {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
                .count()
                < 2
        }
        Err(_) => false,
    }
}

/// Unreadable or malformed metadata counts as defining a color
fn color_set_defines_color(dir: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(dir.join(METADATA_FILE)) else {
        return true;
    };
    let Ok(metadata) = serde_json::from_str::<Value>(&contents) else {
        return true;
    };

    metadata
        .get("colors")
        .and_then(Value::as_array)
        .map(|colors| colors.iter().any(color_is_defined))
        .unwrap_or(false)
}

fn color_is_defined(entry: &Value) -> bool {
    let Some(color) = entry.get("color") else {
        return false;
    };
    if color.get("reference").and_then(Value::as_str).map(|r| !r.is_empty()).unwrap_or(false) {
        return true;
    }
    color
        .get("components")
        .and_then(Value::as_object)
        .map(|components| components.values().any(|v| !is_blank(v)))
        .unwrap_or(false)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
