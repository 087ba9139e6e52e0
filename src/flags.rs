//! Per-record flags (bookmark, plus, pin, more).
//!
//! Flags are stored in a JSON file separate from the datasets, keyed by
//! record id:
//!
//! ```json
//! { "IN.GDP.Q": { "bookmark": true, "plus": false, "pin": false, "more": false } }
//! ```
//!
//! The file is read once when [`FlagStorage`] is opened and rewritten as a
//! whole after every toggle. Unreadable or malformed content is discarded
//! with a warning; it never prevents startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::model::{DatasetRecord, FlagKind};
use crate::util::atomic_write;

/// Flag storage filename.
pub const FLAGS_FILENAME: &str = "flags.json";

/// The four flags of one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagSet {
    /// Bookmarked.
    #[serde(default)]
    pub bookmark: bool,
    /// In the cart.
    #[serde(default)]
    pub plus: bool,
    /// Pinned.
    #[serde(default)]
    pub pin: bool,
    /// More-options marker.
    #[serde(default)]
    pub more: bool,
}

impl FlagSet {
    /// Value of one flag.
    pub fn get(&self, kind: FlagKind) -> bool {
        match kind {
            FlagKind::Bookmark => self.bookmark,
            FlagKind::Plus => self.plus,
            FlagKind::Pin => self.pin,
            FlagKind::More => self.more,
        }
    }

    /// Set one flag.
    pub fn set(&mut self, kind: FlagKind, value: bool) {
        let slot = match kind {
            FlagKind::Bookmark => &mut self.bookmark,
            FlagKind::Plus => &mut self.plus,
            FlagKind::Pin => &mut self.pin,
            FlagKind::More => &mut self.more,
        };
        *slot = value;
    }

    /// Flip one flag and return its new value.
    pub fn toggle(&mut self, kind: FlagKind) -> bool {
        let value = !self.get(kind);
        self.set(kind, value);
        value
    }

    /// True when every flag is off.
    pub fn is_empty(&self) -> bool {
        !(self.bookmark || self.plus || self.pin || self.more)
    }

    /// Flags that are on, in display order.
    pub fn active(&self) -> impl Iterator<Item = FlagKind> + '_ {
        FlagKind::ALL.into_iter().filter(|kind| self.get(*kind))
    }
}

/// Record id → flags.
///
/// An absent entry and an all-false entry are the same state: all-false
/// entries are kept in memory so ids keep their position, but they are not
/// written out and do not count toward [`FlagStore::len`].
#[derive(Debug, Clone, Default)]
pub struct FlagStore {
    entries: IndexMap<String, FlagSet>,
}

impl FlagStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted JSON form.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| CatalogError::SerializationError {
            context: "Invalid flags file".to_string(),
            source: e,
        })
    }

    /// Serialize to the persisted JSON form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CatalogError::SerializationError {
            context: "Failed to serialize flags".to_string(),
            source: e,
        })
    }

    /// Flags for a record; all false when absent.
    pub fn get(&self, record_id: &str) -> FlagSet {
        self.entries.get(record_id).copied().unwrap_or_default()
    }

    /// Whether a record has a flag on.
    pub fn is_set(&self, record_id: &str, kind: FlagKind) -> bool {
        self.get(record_id).get(kind)
    }

    /// Flip a flag for a record and return its new value.
    pub fn toggle(&mut self, record_id: &str, kind: FlagKind) -> bool {
        self.entries
            .entry(record_id.to_string())
            .or_default()
            .toggle(kind)
    }

    /// Set a flag for a record.
    pub fn set(&mut self, record_id: &str, kind: FlagKind, value: bool) {
        self.entries
            .entry(record_id.to_string())
            .or_default()
            .set(kind, value);
    }

    /// Ids with a flag on, in store order.
    pub fn ids_with(&self, kind: FlagKind) -> Vec<&str> {
        self.iter()
            .filter(|(_, flags)| flags.get(kind))
            .map(|(id, _)| id)
            .collect()
    }

    /// Non-empty entries in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FlagSet)> {
        self.entries
            .iter()
            .filter(|(_, flags)| !flags.is_empty())
            .map(|(id, flags)| (id.as_str(), *flags))
    }

    /// Number of records with at least one flag on.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when no record has any flag on.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl PartialEq for FlagStore {
    fn eq(&self, other: &Self) -> bool {
        let ours: HashMap<_, _> = self.iter().collect();
        let theirs: HashMap<_, _> = other.iter().collect();
        ours == theirs
    }
}

impl Eq for FlagStore {}

impl Serialize for FlagStore {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for FlagStore {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = IndexMap::<String, FlagSet>::deserialize(deserializer)?;
        Ok(Self { entries })
    }
}

/// Count the given records that have a flag on.
///
/// With [`FlagKind::Plus`] over a whole dataset this is the cart badge.
pub fn flag_filter_count<'a, I>(records: I, store: &FlagStore, kind: FlagKind) -> usize
where
    I: IntoIterator<Item = &'a DatasetRecord>,
{
    records
        .into_iter()
        .filter(|record| store.is_set(&record.id, kind))
        .count()
}

/// A [`FlagStore`] bound to its durable file.
#[derive(Debug, Clone)]
pub struct FlagStorage {
    path: PathBuf,
    store: FlagStore,
}

impl FlagStorage {
    /// Open the store at `path`, reading it once.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let store = Self::load(&path);
        Self { path, store }
    }

    /// Open `flags.json` inside a data directory.
    pub fn open_in(data_dir: &Path) -> Self {
        Self::open(data_dir.join(FLAGS_FILENAME))
    }

    /// Read the durable copy.
    ///
    /// A missing file is an empty store. A file that cannot be read or
    /// parsed is logged and also treated as empty.
    pub fn load(path: &Path) -> FlagStore {
        if !path.exists() {
            debug!(path = %path.display(), "No flags file; starting empty");
            return FlagStore::new();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read flags file; starting empty");
                return FlagStore::new();
            }
        };

        match FlagStore::from_json(&content) {
            Ok(store) => store,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discarding malformed flags file");
                FlagStore::new()
            }
        }
    }

    /// Path of the durable file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory store.
    pub fn store(&self) -> &FlagStore {
        &self.store
    }

    /// Flip a flag and persist the whole store.
    ///
    /// If the write fails the flip is undone, so memory keeps matching disk.
    pub fn toggle(&mut self, record_id: &str, kind: FlagKind) -> Result<bool> {
        let value = self.store.toggle(record_id, kind);
        if let Err(e) = self.save() {
            self.store.toggle(record_id, kind);
            warn!(record = record_id, flag = %kind, error = %e, "Could not save flags; toggle reverted");
            return Err(e);
        }
        info!(record = record_id, flag = %kind, value, "Toggled flag");
        Ok(value)
    }

    /// Write the whole store to disk atomically.
    pub fn save(&self) -> Result<()> {
        let content = self.store.to_json()?;
        atomic_write(&self.path, content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_flag_set_toggle() {
        let mut flags = FlagSet::default();
        assert!(flags.is_empty());
        assert!(flags.toggle(FlagKind::Pin));
        assert!(flags.pin);
        assert_eq!(flags.active().collect::<Vec<_>>(), vec![FlagKind::Pin]);
        assert!(!flags.toggle(FlagKind::Pin));
        assert!(flags.is_empty());
    }

    #[test]
    fn test_toggle_absent_defaults_to_false() {
        let mut store = FlagStore::new();
        assert!(!store.is_set("a", FlagKind::Plus));
        assert!(store.toggle("a", FlagKind::Plus));
        assert!(store.is_set("a", FlagKind::Plus));
        assert!(!store.is_set("a", FlagKind::Bookmark));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut store = FlagStore::new();
        store.set("a", FlagKind::Bookmark, true);
        let before = store.clone();
        let json_before = store.to_json().unwrap();

        store.toggle("a", FlagKind::Bookmark);
        store.toggle("a", FlagKind::Bookmark);
        store.toggle("b", FlagKind::More);
        store.toggle("b", FlagKind::More);

        assert_eq!(store, before);
        assert_eq!(store.to_json().unwrap(), json_before);
    }

    #[test]
    fn test_empty_entries_not_serialized() {
        let mut store = FlagStore::new();
        store.toggle("a", FlagKind::Pin);
        store.toggle("a", FlagKind::Pin);
        assert!(store.is_empty());
        assert_eq!(serde_json::to_string(&store).unwrap(), "{}");
    }

    #[test]
    fn test_persisted_shape() {
        let mut store = FlagStore::new();
        store.toggle("x", FlagKind::Plus);
        let value: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"x": {"bookmark": false, "plus": true, "pin": false, "more": false}})
        );
    }

    #[test]
    fn test_partial_entries_default_missing_flags() {
        let store = FlagStore::from_json(r#"{"x": {"pin": true}}"#).unwrap();
        assert!(store.is_set("x", FlagKind::Pin));
        assert!(!store.is_set("x", FlagKind::More));
    }

    #[test]
    fn test_ids_with() {
        let mut store = FlagStore::new();
        store.toggle("a", FlagKind::Plus);
        store.toggle("b", FlagKind::Pin);
        store.toggle("c", FlagKind::Plus);
        assert_eq!(store.ids_with(FlagKind::Plus), vec!["a", "c"]);
    }

    #[test]
    fn test_flag_filter_count() {
        let records = vec![
            DatasetRecord::new("a", "A", "", "", ""),
            DatasetRecord::new("b", "B", "", "", ""),
            DatasetRecord::new("c", "C", "", "", ""),
        ];
        let mut store = FlagStore::new();
        store.toggle("a", FlagKind::Plus);
        store.toggle("c", FlagKind::Plus);
        store.toggle("zzz", FlagKind::Plus);

        assert_eq!(flag_filter_count(&records, &store, FlagKind::Plus), 2);
        assert_eq!(flag_filter_count(&records, &store, FlagKind::Pin), 0);
        assert_eq!(flag_filter_count(records.iter().take(1), &store, FlagKind::Plus), 1);
    }

    #[test]
    fn test_storage_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FlagStorage::open_in(dir.path());
        assert!(storage.store().is_empty());
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_storage_malformed_file_is_discarded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FLAGS_FILENAME);
        std::fs::write(&path, "{ this is not json").unwrap();

        let storage = FlagStorage::open(&path);
        assert!(storage.store().is_empty());
    }

    #[test]
    fn test_storage_wrong_shape_is_discarded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FLAGS_FILENAME);
        std::fs::write(&path, r#"{"a": {"pin": "yes"}}"#).unwrap();

        assert!(FlagStorage::open(&path).store().is_empty());
    }

    #[test]
    fn test_storage_write_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(FLAGS_FILENAME);

        let mut storage = FlagStorage::open(&path);
        assert!(storage.toggle("IN.GDP.Q", FlagKind::Bookmark).unwrap());
        assert!(path.exists());

        let reopened = FlagStorage::open(&path);
        assert!(reopened.store().is_set("IN.GDP.Q", FlagKind::Bookmark));
    }

    #[test]
    fn test_storage_double_toggle_roundtrips_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FLAGS_FILENAME);

        let mut storage = FlagStorage::open(&path);
        storage.toggle("a", FlagKind::Pin).unwrap();
        let original = std::fs::read_to_string(&path).unwrap();

        storage.toggle("b", FlagKind::Plus).unwrap();
        storage.toggle("b", FlagKind::Plus).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_storage_failed_save_reverts_toggle() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let mut storage = FlagStorage::open(blocker.join(FLAGS_FILENAME));
        assert!(storage.toggle("IN.GDP.Q", FlagKind::Pin).is_err());
        assert!(!storage.store().is_set("IN.GDP.Q", FlagKind::Pin));
        assert!(storage.store().is_empty());
    }
}
