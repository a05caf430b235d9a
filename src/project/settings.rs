//! Build-setting lookups across all build configurations

use plist::{Dictionary, Value};
use std::path::Path;

pub const APP_ICON_NAME: &str = "ASSETCATALOG_COMPILER_APPICON_NAME";
pub const INFO_PLIST_FILE: &str = "INFOPLIST_FILE";

/// Settings naming assets that the asset catalog compiler picks up by itself
pub const CATALOG_ASSET_SETTINGS: &[&str] = &[
    APP_ICON_NAME,
    "ASSETCATALOG_COMPILER_ALTERNATE_APPICON_NAMES",
    "ASSETCATALOG_COMPILER_GLOBAL_ACCENT_COLOR_NAME",
    "ASSETCATALOG_COMPILER_WIDGET_BACKGROUND_COLOR_NAME",
    "ASSETCATALOG_COMPILER_LAUNCHIMAGE_NAME",
];

/// Settings naming storyboards loaded by the system at launch
pub const STORYBOARD_SETTINGS: &[&str] = &[
    "INFOPLIST_KEY_UIMainStoryboardFile",
    "INFOPLIST_KEY_UILaunchStoryboardName",
    "INFOPLIST_KEY_NSMainStoryboardFile",
];

const ROOT_PLACEHOLDERS: &[&str] = &[
    "$(SRCROOT)",
    "${SRCROOT}",
    "$(PROJECT_DIR)",
    "${PROJECT_DIR}",
    "$(SOURCE_ROOT)",
    "${SOURCE_ROOT}",
];

/// Build settings of every configuration in the project
#[derive(Debug, Clone, Default)]
pub struct BuildSettings {
    configurations: Vec<Dictionary>,
}

impl BuildSettings {
    pub fn new(configurations: Vec<Dictionary>) -> Self {
        Self { configurations }
    }

    /// All values of `key`; array settings contribute each item
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.configurations
            .iter()
            .filter_map(move |settings| settings.get(key))
            .flat_map(|value| match value {
                Value::String(s) => vec![s.as_str()],
                Value::Array(items) => items.iter().filter_map(Value::as_string).collect(),
                _ => Vec::new(),
            })
    }

    /// Whether any of `keys` names `name`; values may list several names separated by whitespace
    pub fn names(&self, keys: &[&str], name: &str) -> bool {
        keys.iter().any(|key| {
            self.values(key)
                .flat_map(str::split_whitespace)
                .any(|value| value == name)
        })
    }

    pub fn references_app_icon(&self, name: &str) -> bool {
        self.names(&[APP_ICON_NAME], name)
    }

    /// Whether any `INFOPLIST_FILE` setting, with root placeholders expanded, ends `path`
    pub fn references_info_plist(&self, path: &Path, root: &Path) -> bool {
        let path = path.to_string_lossy();
        let root = root.to_string_lossy();
        self.values(INFO_PLIST_FILE)
            .map(|value| expand_root(value, &root))
            .filter(|value| !value.is_empty())
            .any(|value| path.ends_with(&value))
    }
}

fn expand_root(value: &str, root: &str) -> String {
    ROOT_PLACEHOLDERS
        .iter()
        .fold(value.trim().to_string(), |acc, placeholder| acc.replace(placeholder, root))
}
