// Entry catalogue: the immutable pool of selectable items, plus parsers for
// the formats it can be loaded from (Data Dragon JSON, CSV).

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("catalogue contains no entries")]
    Empty,

    #[error("malformed catalogue JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Data Dragon returned an empty version list")]
    NoVersions,

    #[error("entry on line {line} has a blank id")]
    BlankId { line: usize },
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// Stable identifier of a catalogue entry. Numeric ids are carried as their
/// decimal string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

/// Accepts either a JSON string or a non-negative integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntryId {
    Text(String),
    Number(u64),
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawEntryId::deserialize(deserializer)? {
            RawEntryId::Text(s) => EntryId(s),
            RawEntryId::Number(n) => EntryId(n.to_string()),
        })
    }
}

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        EntryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        EntryId(s.to_string())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        EntryId(s)
    }
}

impl From<u32> for EntryId {
    fn from(n: u32) -> Self {
        EntryId(n.to_string())
    }
}

/// A selectable item (e.g. a champion).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    /// Display name.
    pub name: String,
    /// Image reference: a file name resolved against the catalogue's asset
    /// base, or a path/URL used as-is.
    #[serde(default)]
    pub image: String,
    /// Free-form classification tags (e.g. "Mage", "Support").
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Entry {
    pub fn new(id: impl Into<EntryId>, name: impl Into<String>) -> Self {
        Entry {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Where image references resolve to, and which data version they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBase {
    /// Version/context token (e.g. a Data Dragon patch such as "14.1.1").
    pub version: String,
    /// URL prefix that image file names are appended to.
    pub prefix: String,
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// Immutable snapshot of every entry available to the draft, sorted by
/// display name.
#[derive(Debug, Clone)]
pub struct Catalogue {
    entries: Vec<Entry>,
    index: HashMap<EntryId, usize>,
    assets: Option<AssetBase>,
}

impl Catalogue {
    /// Build a catalogue from loaded entries.
    ///
    /// Entries are sorted by name (case-insensitive, ties broken by id).
    /// When an id appears more than once the first occurrence wins.
    pub fn new(entries: Vec<Entry>) -> Result<Self, CatalogueError> {
        let mut unique: Vec<Entry> = Vec::with_capacity(entries.len());
        let mut seen: HashSet<EntryId> = HashSet::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.id.clone()) {
                warn!("Duplicate catalogue id '{}' ({}), keeping first", entry.id, entry.name);
                continue;
            }
            unique.push(entry);
        }

        if unique.is_empty() {
            return Err(CatalogueError::Empty);
        }

        unique.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });

        let index = unique
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();

        Ok(Catalogue {
            entries: unique,
            index,
            assets: None,
        })
    }

    /// Attach the asset base used by [`Catalogue::image_url`].
    pub fn with_assets(mut self, assets: AssetBase) -> Self {
        self.assets = Some(assets);
        self
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.index.contains_key(id)
    }

    /// Position of `id` in display order.
    pub fn position(&self, id: &EntryId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Data version the catalogue was loaded for, if known.
    pub fn version(&self) -> Option<&str> {
        self.assets.as_ref().map(|a| a.version.as_str())
    }

    /// Display name for `id`, falling back to the raw id.
    pub fn name_of(&self, id: &EntryId) -> String {
        self.get(id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Resolve an entry's image reference to something renderable.
    ///
    /// Returns `None` for unknown ids or entries without an image.
    pub fn image_url(&self, id: &EntryId) -> Option<String> {
        let entry = self.get(id)?;
        if entry.image.is_empty() {
            return None;
        }
        match &self.assets {
            Some(assets) => Some(format!(
                "{}/{}",
                assets.prefix.trim_end_matches('/'),
                entry.image
            )),
            None => Some(entry.image.clone()),
        }
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Data Dragon parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawChampionFile {
    data: HashMap<String, RawChampion>,
}

#[derive(Debug, Deserialize)]
struct RawChampion {
    id: String,
    name: String,
    #[serde(default)]
    image: Option<RawImage>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    full: String,
}

/// Pick the newest version from a Data Dragon `versions.json` body.
///
/// The array is ordered newest-first.
pub fn parse_ddragon_versions(json: &str) -> Result<String, CatalogueError> {
    let versions: Vec<String> = serde_json::from_str(json)?;
    versions.into_iter().next().ok_or(CatalogueError::NoVersions)
}

/// Parse a Data Dragon `champion.json` body into catalogue entries.
pub fn parse_ddragon_champions(json: &str) -> Result<Vec<Entry>, CatalogueError> {
    let file: RawChampionFile = serde_json::from_str(json)?;
    let entries = file
        .data
        .into_values()
        .map(|c| Entry {
            id: EntryId::new(c.id),
            name: c.name,
            image: c.image.map(|i| i.full).unwrap_or_default(),
            tags: c.tags,
        })
        .collect();
    Ok(entries)
}

/// Parse a local JSON catalogue: either a Data Dragon `champion.json`
/// document or a plain array of entries.
pub fn parse_json(json: &str) -> Result<Vec<Entry>, CatalogueError> {
    if json.trim_start().starts_with('[') {
        let entries: Vec<Entry> = serde_json::from_str(json)?;
        if let Some(pos) = entries.iter().position(|e| e.id.as_str().trim().is_empty()) {
            return Err(CatalogueError::BlankId { line: pos + 1 });
        }
        Ok(entries)
    } else {
        parse_ddragon_champions(json)
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawCsvEntry {
    id: String,
    name: String,
    #[serde(default)]
    image: String,
    /// `|`-separated.
    #[serde(default)]
    tags: String,
}

/// Parse a CSV catalogue with header `id,name[,image][,tags]`.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Entry>, CatalogueError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (i, record) in rdr.deserialize::<RawCsvEntry>().enumerate() {
        let raw = record?;
        if raw.id.is_empty() {
            // Line 1 is the header.
            return Err(CatalogueError::BlankId { line: i + 2 });
        }
        let tags = raw
            .tags
            .split('|')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        entries.push(Entry {
            id: EntryId::new(raw.id),
            name: raw.name,
            image: raw.image,
            tags,
        });
    }
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
