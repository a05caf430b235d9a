use std::path::Path;

/// Classification of a file reference, from its declared kind or extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Code,
    Header,
    PropertyList,
    Markup,
    InterfaceBuilder,
    Entitlements,
    AssetCatalog,
    Strings,
    Library,
    BuildConfig,
    DataModel,
    Font,
    Other,
}

/// (declared kinds, extensions) per kind
const KIND_TABLE: &[(FileKind, &[&str], &[&str])] = &[
    (
        FileKind::Code,
        &[
            "sourcecode.swift",
            "sourcecode.c.objc",
            "sourcecode.cpp.objcpp",
            "sourcecode.c.c",
            "sourcecode.cpp.cpp",
            "sourcecode.metal",
            "sourcecode.asm",
        ],
        &["swift", "m", "mm", "c", "cc", "cpp", "cxx", "metal", "s"],
    ),
    (
        FileKind::Header,
        &["sourcecode.c.h", "sourcecode.cpp.h"],
        &["h", "hh", "hpp", "pch", "inl"],
    ),
    (
        FileKind::PropertyList,
        &["text.plist.xml", "text.plist", "file.bplist"],
        &["plist"],
    ),
    (FileKind::Markup, &["text.html"], &["html", "htm"]),
    (
        FileKind::InterfaceBuilder,
        &["file.storyboard", "file.xib"],
        &["storyboard", "xib"],
    ),
    (FileKind::Entitlements, &["text.plist.entitlements"], &["entitlements"]),
    (FileKind::AssetCatalog, &["folder.assetcatalog"], &["xcassets"]),
    (
        FileKind::Strings,
        &["text.plist.strings", "text.plist.stringsdict"],
        &["strings", "stringsdict"],
    ),
    (
        FileKind::Library,
        &[
            "wrapper.framework",
            "wrapper.xcframework",
            "archive.ar",
            "compiled.mach-o.dylib",
            "sourcecode.text-based-dylib-definition",
        ],
        &["framework", "xcframework", "a", "dylib", "tbd"],
    ),
    (FileKind::BuildConfig, &["text.xcconfig"], &["xcconfig"]),
    (
        FileKind::DataModel,
        &["wrapper.xcdatamodel", "wrapper.xcdatamodeld", "wrapper.xcmappingmodel"],
        &["xcdatamodel", "xcdatamodeld", "xcmappingmodel"],
    ),
    (FileKind::Font, &[], &["ttf", "otf", "ttc"]),
];

impl FileKind {
    /// Declared kind wins; unknown or missing declared kinds fall back to the extension
    pub fn classify(declared_kind: Option<&str>, path: &Path) -> Self {
        if let Some(declared) = declared_kind {
            if let Some((kind, _, _)) = KIND_TABLE.iter().find(|(_, kinds, _)| kinds.contains(&declared)) {
                return *kind;
            }
        }
        Self::from_path(path)
    }

    pub fn from_path(path: &Path) -> Self {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return FileKind::Other;
        };
        let extension = extension.to_ascii_lowercase();
        KIND_TABLE
            .iter()
            .find(|(_, _, extensions)| extensions.contains(&extension.as_str()))
            .map(|(kind, _, _)| *kind)
            .unwrap_or(FileKind::Other)
    }

    /// Source files: compiled or read by other sources, never resources
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            FileKind::Code | FileKind::Header | FileKind::PropertyList | FileKind::Markup
        )
    }

    pub fn is_header(&self) -> bool {
        matches!(self, FileKind::Header)
    }

    /// Files searched for resource names
    pub fn is_scanned(&self) -> bool {
        self.is_source() || matches!(self, FileKind::InterfaceBuilder)
    }

    /// Files validated as property lists
    pub fn is_property_list(&self) -> bool {
        matches!(self, FileKind::PropertyList | FileKind::Entitlements)
    }

    /// Non-source kinds that are never unused-resource candidates
    pub fn is_excluded_resource(&self) -> bool {
        matches!(
            self,
            FileKind::AssetCatalog
                | FileKind::Strings
                | FileKind::Library
                | FileKind::BuildConfig
                | FileKind::DataModel
                | FileKind::Entitlements
        )
    }
}
