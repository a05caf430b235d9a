//! Font names stored inside font files
//!
//! Code usually loads a font by its full or PostScript name, not by file name.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;
use ttf_parser::{fonts_in_collection, name_id, Face};

/// Full and PostScript names of every face in the font file; empty when the
/// file cannot be read or parsed
pub fn font_names(path: &Path) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            debug!("Cannot read font {}: {}", path.display(), e);
            return names;
        }
    };

    let faces = fonts_in_collection(&data).unwrap_or(1);
    for index in 0..faces {
        let face = match Face::parse(&data, index) {
            Ok(face) => face,
            Err(e) => {
                debug!("Cannot parse font {} (face {}): {}", path.display(), index, e);
                continue;
            }
        };
        for name in face.names() {
            if name.name_id != name_id::FULL_NAME && name.name_id != name_id::POST_SCRIPT_NAME {
                continue;
            }
            if let Some(value) = name.to_string().filter(|v| !v.is_empty()) {
                names.insert(value);
            }
        }
    }

    names
}
