//! Text search of source files for resource names
//!
//! The search is a heuristic: a resource counts as used when one of its name
//! variants shows up in a source file in a shape typical for that file's
//! syntax. Names assembled at runtime are missed, and matches inside string
//! literals unrelated to resources are not told apart.

use crate::project::{FileKind, FileReference, Project};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

/// How resource names are written in a scanned file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchSyntax {
    /// Swift, Objective-C, C and friends
    Code,
    /// HTML and Interface Builder documents
    Markup,
    PropertyList,
}

impl SearchSyntax {
    pub fn for_kind(kind: FileKind) -> Option<Self> {
        match kind {
            FileKind::Code | FileKind::Header => Some(SearchSyntax::Code),
            FileKind::Markup | FileKind::InterfaceBuilder => Some(SearchSyntax::Markup),
            FileKind::PropertyList => Some(SearchSyntax::PropertyList),
            _ => None,
        }
    }

    /// Search strings for `name`, in the order they are tried
    pub fn search_strings(&self, name: &str) -> Vec<String> {
        match self {
            SearchSyntax::Code => vec![format!("\"{}\"", name), format!("/{}\"", name)],
            SearchSyntax::Markup => vec![format!(">{}<", name), format!("\"{}\"", name)],
            SearchSyntax::PropertyList => vec![format!(">{}<", name)],
        }
    }

    /// Whether any variant appears in `text`
    pub fn mentions(&self, text: &str, variants: &BTreeSet<String>) -> bool {
        variants.iter().any(|variant| {
            self.search_strings(variant)
                .iter()
                .any(|needle| text.contains(needle.as_str()))
        })
    }
}

/// A file searched for resource names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub syntax: SearchSyntax,
    /// The file is the Info.plist of some target
    pub is_info_plist: bool,
}

impl SourceFile {
    pub fn from_reference(file: &FileReference, project: &Project) -> Option<Self> {
        let syntax = SearchSyntax::for_kind(file.kind)?;
        Some(Self {
            path: file.path.clone(),
            syntax,
            is_info_plist: syntax == SearchSyntax::PropertyList
                && project.references_property_list_as_info_plist(file),
        })
    }

    /// File contents; invalid UTF-8 is replaced rather than rejected
    pub fn read_contents(&self) -> io::Result<String> {
        let bytes = fs::read(&self.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Existing scanned files of the project, one per path, in project order
pub fn source_files(project: &Project) -> Vec<SourceFile> {
    let mut seen = BTreeSet::new();
    project
        .files()
        .iter()
        .filter(|file| file.kind.is_scanned() && file.path.is_file())
        .filter(|file| seen.insert(file.path.clone()))
        .filter_map(|file| SourceFile::from_reference(file, project))
        .collect()
}

struct Patterns {
    block_comment: Regex,
    line_comment: Regex,
    markup_comment: Regex,
    app_fonts: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        block_comment: Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern is valid"),
        // `//` not preceded by `:` so URLs survive
        line_comment: Regex::new(r"(?m)(^|[^:])//.*$").expect("line comment pattern is valid"),
        markup_comment: Regex::new(r"(?s)<!--.*?-->").expect("markup comment pattern is valid"),
        app_fonts: Regex::new(r"(?s)<key>UIAppFonts</key>\s*<array>.*?</array>")
            .expect("font registration pattern is valid"),
    })
}

/// Remove comments in the syntax of the file
pub fn strip_comments(text: &str, syntax: SearchSyntax) -> String {
    let patterns = patterns();
    match syntax {
        SearchSyntax::Code => {
            let without_blocks = patterns.block_comment.replace_all(text, "");
            patterns
                .line_comment
                .replace_all(&without_blocks, "$1")
                .into_owned()
        }
        SearchSyntax::Markup | SearchSyntax::PropertyList => {
            patterns.markup_comment.replace_all(text, "").into_owned()
        }
    }
}

/// Remove the font registration array of an Info.plist
pub fn strip_font_registration(text: &str) -> String {
    patterns().app_fonts.replace_all(text, "").into_owned()
}

/// Text of `source` as it should be searched
pub fn prepare(source: &SourceFile, text: String, strip: bool) -> String {
    let text = if strip {
        strip_comments(&text, source.syntax)
    } else {
        text
    };
    if source.is_info_plist {
        strip_font_registration(&text)
    } else {
        text
    }
}
