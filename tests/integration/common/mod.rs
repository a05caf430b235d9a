//! Shared fixture builder for integration tests
//!
//! A fixture is a temporary directory holding `App.xcodeproj/project.pbxproj`
//! plus whatever files a test writes next to it. Objects are written in the
//! OpenStep format Xcode itself uses.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Fixture {
    temp: TempDir,
    objects: Vec<String>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
            objects: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn bundle(&self) -> PathBuf {
        self.root().join("App.xcodeproj")
    }

    /// Add a raw object body, e.g. `isa = PBXGroup; children = ();`
    pub fn object(&mut self, id: &str, body: &str) -> &mut Self {
        self.objects.push(format!("\t\t{} = {{{}}};", id, body));
        self
    }

    pub fn group(&mut self, id: &str, path: Option<&str>, children: &[&str]) -> &mut Self {
        let path = path.map(|p| format!(" path = \"{}\";", p)).unwrap_or_default();
        let body = format!(
            "isa = PBXGroup; children = ({});{} sourceTree = \"<group>\";",
            children.join(", "),
            path
        );
        self.object(id, &body)
    }

    pub fn named_group(&mut self, id: &str, name: &str, children: &[&str]) -> &mut Self {
        let body = format!(
            "isa = PBXGroup; children = ({}); name = \"{}\"; sourceTree = \"<group>\";",
            children.join(", "),
            name
        );
        self.object(id, &body)
    }

    pub fn file_ref(&mut self, id: &str, path: &str) -> &mut Self {
        let body = format!("isa = PBXFileReference; path = \"{}\"; sourceTree = \"<group>\";", path);
        self.object(id, &body)
    }

    /// File reference plus a build file making it a member of some target
    pub fn member(&mut self, id: &str, path: &str) -> &mut Self {
        self.file_ref(id, path);
        let body = format!("isa = PBXBuildFile; fileRef = {};", id);
        self.object(&format!("{}_BUILD", id), &body)
    }

    /// Native target whose sources phase lists the build files of `sources`
    pub fn target(&mut self, id: &str, name: &str, sources: &[&str]) -> &mut Self {
        let files: Vec<String> = sources.iter().map(|s| format!("{}_BUILD", s)).collect();
        let phase_body = format!("isa = PBXSourcesBuildPhase; files = ({});", files.join(", "));
        self.object(&format!("{}_SOURCES", id), &phase_body);
        let body = format!(
            "isa = PBXNativeTarget; name = \"{}\"; buildPhases = ({}_SOURCES);",
            name, id
        );
        self.object(id, &body)
    }

    pub fn build_settings(&mut self, id: &str, settings: &[(&str, &str)]) -> &mut Self {
        let settings: Vec<String> = settings
            .iter()
            .map(|(k, v)| format!("{} = \"{}\";", k, v))
            .collect();
        let body = format!(
            "isa = XCBuildConfiguration; name = Debug; buildSettings = {{{}}};",
            settings.join(" ")
        );
        self.object(id, &body)
    }

    /// Write a file relative to the project root
    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write the project document and return the bundle path
    pub fn write_project(&self) -> PathBuf {
        let bundle = self.bundle();
        fs::create_dir_all(&bundle).unwrap();
        let document = format!(
            "// !$*UTF8*$!\n{{\n\tarchiveVersion = 1;\n\tobjectVersion = 56;\n\tobjects = {{\n{}\n\t}};\n\trootObject = ROOT;\n}}\n",
            self.objects.join("\n")
        );
        fs::write(bundle.join("project.pbxproj"), document).unwrap();
        bundle
    }
}

/// Smallest TrueType file a parser accepts: `head`, `hhea` and `maxp`, plus a
/// `name` table carrying the full (id 4) and PostScript (id 6) names
pub fn minimal_font(full_name: &str, postscript_name: &str) -> Vec<u8> {
    let mut head = vec![0u8; 54];
    head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    head[18..20].copy_from_slice(&1000u16.to_be_bytes()); // unitsPerEm
    let mut hhea = vec![0u8; 36];
    hhea[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    hhea[34..36].copy_from_slice(&1u16.to_be_bytes()); // numberOfHMetrics
    let mut maxp = 0x0000_5000u32.to_be_bytes().to_vec();
    maxp.extend_from_slice(&1u16.to_be_bytes());

    let strings: Vec<Vec<u8>> = [full_name, postscript_name]
        .iter()
        .map(|s| s.encode_utf16().flat_map(u16::to_be_bytes).collect())
        .collect();
    let mut name = Vec::new();
    for field in [0u16, 2, 6 + 12 * 2] {
        name.extend_from_slice(&field.to_be_bytes());
    }
    let mut string_offset = 0u16;
    for (name_id, string) in [4u16, 6].into_iter().zip(&strings) {
        // Windows platform, Unicode BMP, en-US
        for field in [3u16, 1, 0x0409, name_id, string.len() as u16, string_offset] {
            name.extend_from_slice(&field.to_be_bytes());
        }
        string_offset += string.len() as u16;
    }
    for string in &strings {
        name.extend_from_slice(string);
    }

    // Table records must be sorted by tag
    let tables: [(&[u8; 4], Vec<u8>); 4] = [(b"head", head), (b"hhea", hhea), (b"maxp", maxp), (b"name", name)];
    let directory_len = 12 + 16 * tables.len();
    let mut font = 0x0001_0000u32.to_be_bytes().to_vec();
    font.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    font.extend_from_slice(&[0u8; 6]);
    let mut body = Vec::new();
    for (tag, data) in &tables {
        font.extend_from_slice(*tag);
        font.extend_from_slice(&0u32.to_be_bytes());
        font.extend_from_slice(&((directory_len + body.len()) as u32).to_be_bytes());
        font.extend_from_slice(&(data.len() as u32).to_be_bytes());
        body.extend_from_slice(data);
        body.resize(body.len().div_ceil(4) * 4, 0);
    }
    font.extend(body);
    font
}
