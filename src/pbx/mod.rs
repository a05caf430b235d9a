//! Project document decoding
//!
//! `project.pbxproj` files are usually OpenStep text, but XML and binary
//! property lists describing the same tree are accepted too. The `plist`
//! reader detects the encoding.

pub mod document;
pub mod path;

pub use document::{Document, FileRecord, GroupKind, GroupRecord, RawObject, Record, TargetRecord};
pub use path::{PathResolver, SourceTree};

use crate::project::ProjectError;
use plist::Value;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Decode document bytes in any supported encoding
pub fn decode(bytes: &[u8]) -> Result<Value, ProjectError> {
    Value::from_reader(Cursor::new(bytes))
        .map_err(|e| ProjectError::Incompatible(format!("unsupported or malformed document: {}", e)))
}

/// Read and classify the document at `path`
pub fn load_document(path: &Path) -> Result<Document, ProjectError> {
    debug!("Reading project document {}", path.display());
    let bytes = std::fs::read(path)?;
    let value = decode(&bytes)?;
    Document::from_value(&value)
}
