//! Reference entries and the localization resolver.
//!
//! Entries live at `reference/<locale>/<library>/<name>.json`. The file stem
//! is the entry's page name and the name of its asset directory under
//! `reference/assets/`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use refbook_core::ContentRecord;

use crate::error::ContentError;

/// Library whose pages live directly under `/reference/`.
pub const DEFAULT_LIBRARY: &str = "processing";

/// Directory under `reference/` holding example code and images.
const ASSETS_DIR: &str = "assets";

/// A single API reference entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    /// Display name, e.g. `abs()`
    pub name: String,

    /// Description HTML
    pub description: String,

    /// One-line summary for listings
    #[serde(default)]
    pub brief: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub subcategory: Option<String>,

    /// Entry kind (`function`, `class`, `method`, `field`, ...)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub syntax: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub returns: Option<String>,

    /// Names of related entries
    #[serde(default)]
    pub related: Vec<String>,

    /// Names of entries this one is used by
    #[serde(default)]
    pub in_use: Option<Vec<String>>,
}

/// A parameter of a reference entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Parameter {
    pub name: String,

    #[serde(default, rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub description: String,
}

impl ReferenceEntry {
    /// Whether the entry is listed in the sidebar and index.
    ///
    /// Methods and fields are only reachable through their class page.
    pub fn is_listed(&self) -> bool {
        !matches!(self.kind.as_deref(), Some("method") | Some("field"))
    }

    /// Grouping path `<category>[/<subcategory>]`, if the entry has a category.
    pub fn group_path(&self) -> Option<String> {
        let category = self.category.as_deref().filter(|c| !c.is_empty())?;
        match self.subcategory.as_deref().filter(|s| !s.is_empty()) {
            Some(sub) => Some(format!("{}/{}", category, sub)),
            None => Some(category.to_string()),
        }
    }

    fn validate(&self, path: &Path) -> Result<(), ContentError> {
        if self.name.trim().is_empty() {
            return Err(ContentError::schema(path, "entry name must not be empty"));
        }
        if let Some(param) = self.parameters.iter().find(|p| p.name.trim().is_empty()) {
            return Err(ContentError::schema(
                path,
                format!("parameter with empty name ({})", param.description),
            ));
        }
        Ok(())
    }
}

/// Result of looking up a page in a given locale.
#[derive(Debug, Clone, PartialEq)]
pub enum Localized<'a> {
    /// The entry exists in the requested locale
    Translated(&'a ReferenceEntry),

    /// No translation; link to the default-locale page instead
    Fallback { link: String },
}

/// Site-relative path of the page `name` in `library`.
pub fn page_path(library: &str, name: &str) -> String {
    if library == DEFAULT_LIBRARY {
        format!("reference/{}.html", name)
    } else {
        format!("reference/libraries/{}/{}.html", library, name)
    }
}

/// Link to the default-locale page of `name` in `library`.
pub fn fallback_link(library: &str, name: &str) -> String {
    format!("/{}", page_path(library, name))
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct EntryKey {
    locale: String,
    library: String,
    name: String,
}

/// All reference entries, indexed by locale, library and page name.
#[derive(Debug, Default)]
pub struct ReferenceSet {
    entries: BTreeMap<EntryKey, ReferenceEntry>,
}

/// Load every reference entry under `<root>/reference`.
pub fn load_reference(root: &Path) -> Result<ReferenceSet, ContentError> {
    let dir = root.join("reference");
    if !dir.exists() {
        return Err(ContentError::NotFound(dir));
    }

    let mut set = ReferenceSet::default();

    for entry in WalkDir::new(&dir)
        .min_depth(3)
        .max_depth(3)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let relative = path.strip_prefix(&dir).unwrap_or(path);
        let parts: Vec<&str> = relative
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect();
        let [locale, library, _] = parts.as_slice() else {
            continue;
        };
        if *locale == ASSETS_DIR {
            continue;
        }

        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!("Skipping reference file with non-UTF-8 name: {}", path.display());
            continue;
        };

        let content = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let parsed: ReferenceEntry =
            serde_json::from_str(&content).map_err(|e| ContentError::InvalidJson {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        parsed.validate(path)?;

        set.insert(locale, library, name, parsed);
    }

    tracing::debug!("Loaded {} reference entries from {}", set.len(), dir.display());

    Ok(set)
}

impl ReferenceSet {
    /// Add an entry.
    pub fn insert(&mut self, locale: &str, library: &str, name: &str, entry: ReferenceEntry) {
        self.entries.insert(
            EntryKey {
                locale: locale.to_string(),
                library: library.to_string(),
                name: name.to_string(),
            },
            entry,
        );
    }

    /// Look up an entry.
    pub fn get(&self, locale: &str, library: &str, name: &str) -> Option<&ReferenceEntry> {
        self.entries.get(&EntryKey {
            locale: locale.to_string(),
            library: library.to_string(),
            name: name.to_string(),
        })
    }

    /// Resolve the page `name` for `locale`, falling back to a link when untranslated.
    pub fn resolve(&self, locale: &str, library: &str, name: &str) -> Localized<'_> {
        match self.get(locale, library, name) {
            Some(entry) => Localized::Translated(entry),
            None => Localized::Fallback {
                link: fallback_link(library, name),
            },
        }
    }

    /// Page names of `library` in `locale`, sorted.
    pub fn names(&self, locale: &str, library: &str) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|k| k.locale == locale && k.library == library)
            .map(|k| k.name.as_str())
            .collect()
    }

    /// Libraries with at least one entry in `locale`, sorted.
    pub fn libraries(&self, locale: &str) -> Vec<&str> {
        let mut libs: Vec<&str> = self
            .entries
            .keys()
            .filter(|k| k.locale == locale)
            .map(|k| k.library.as_str())
            .collect();
        libs.dedup();
        libs
    }

    /// Listed entries of `library` in `locale` as grouping records.
    ///
    /// The record identifier is the page name. Entries without a category
    /// cannot be placed and are skipped.
    pub fn sidebar_items(&self, locale: &str, library: &str) -> Vec<ContentRecord> {
        self.entries
            .iter()
            .filter(|(k, e)| k.locale == locale && k.library == library && e.is_listed())
            .filter_map(|(k, e)| {
                let path = e.group_path();
                if path.is_none() {
                    tracing::debug!("Reference entry '{}' has no category", k.name);
                }
                path.map(|p| ContentRecord::new(p, k.name.clone()))
            })
            .collect()
    }

    /// Total number of entries across all locales.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
