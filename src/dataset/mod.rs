//! Dataset repository.
//!
//! Holds the two immutable datasets. Each dataset is built from a
//! pre-shaped document:
//!
//! ```json
//! { "frequent": [ { "id": "...", "title": "...", "cat": "...", ... } ],
//!   "categories": { "Economy": { "Prices": { "CPI": {} } } } }
//! ```
//!
//! Reading is lenient: a missing or non-array `frequent` gives an empty
//! dataset, elements that are not records are skipped, and a missing
//! `categories` gives an empty tree. Only text that is not JSON at all is
//! rejected.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::model::{CategoryTree, DataSource, DatasetRecord};

/// Embedded India & States document.
const INDIA_DOCUMENT: &str = include_str!("../../data/india.json");

/// Embedded IMF document.
const IMF_DOCUMENT: &str = include_str!("../../data/imf.json");

/// A parsed but not yet deduplicated dataset document.
#[derive(Debug, Clone, Default)]
pub struct DatasetDocument {
    /// Records in document order.
    pub frequent: Vec<DatasetRecord>,
    /// Navigation tree.
    pub categories: CategoryTree,
}

impl DatasetDocument {
    /// Parse a document for the given source.
    pub fn from_json(source: DataSource, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| CatalogError::Dataset {
            source_name: source.key().to_string(),
            message: "document is not valid JSON".to_string(),
            source: Some(e),
        })?;
        Ok(Self::from_value(source, &value))
    }

    /// Build a document from an already parsed JSON value.
    pub fn from_value(source: DataSource, value: &Value) -> Self {
        let frequent = match value.get("frequent") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    match serde_json::from_value::<DatasetRecord>(item.clone()) {
                        Ok(record) => Some(record),
                        Err(e) => {
                            warn!(source = %source, index, error = %e, "Skipping malformed record");
                            None
                        }
                    }
                })
                .collect(),
            Some(_) => {
                warn!(source = %source, "`frequent` is not an array; treating dataset as empty");
                Vec::new()
            }
            None => {
                debug!(source = %source, "`frequent` missing; treating dataset as empty");
                Vec::new()
            }
        };

        let categories = value
            .get("categories")
            .map(CategoryTree::from_value)
            .unwrap_or_default();

        Self {
            frequent,
            categories,
        }
    }
}

/// One immutable dataset: unique records plus its category tree.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: DataSource,
    records: Vec<DatasetRecord>,
    categories: CategoryTree,
}

impl Dataset {
    /// Build a dataset, dropping records whose id was already seen.
    pub fn from_document(source: DataSource, document: DatasetDocument) -> Self {
        let total = document.frequent.len();
        let records = dedup_by_id(document.frequent);
        if records.len() != total {
            debug!(
                source = %source,
                dropped = total - records.len(),
                "Dropped duplicate record ids"
            );
        }

        Self {
            source,
            records,
            categories: document.categories,
        }
    }

    /// Data source this dataset belongs to.
    pub fn source(&self) -> DataSource {
        self.source
    }

    /// Records in first-seen order.
    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    /// Navigation tree.
    pub fn categories(&self) -> &CategoryTree {
        &self.categories
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&DatasetRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Keep the first record for each id, preserving order.
pub fn dedup_by_id(records: Vec<DatasetRecord>) -> Vec<DatasetRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}

/// Optional file overrides for the embedded documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPaths {
    /// Replacement India & States document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub india: Option<PathBuf>,
    /// Replacement IMF document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imf: Option<PathBuf>,
}

impl DatasetPaths {
    /// Override path for a source.
    pub fn path_for(&self, source: DataSource) -> Option<&Path> {
        match source {
            DataSource::India => self.india.as_deref(),
            DataSource::Imf => self.imf.as_deref(),
        }
    }
}

/// Both datasets, constructed once and never mutated.
#[derive(Debug, Clone)]
pub struct Repository {
    india: Dataset,
    imf: Dataset,
}

impl Repository {
    /// Repository over the documents shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::load(&DatasetPaths::default())
    }

    /// Repository with optional per-source file overrides.
    pub fn load(paths: &DatasetPaths) -> Result<Self> {
        Ok(Self {
            india: load_dataset(DataSource::India, paths.path_for(DataSource::India))?,
            imf: load_dataset(DataSource::Imf, paths.path_for(DataSource::Imf))?,
        })
    }

    /// Repository from two in-memory datasets.
    pub fn from_datasets(india: Dataset, imf: Dataset) -> Self {
        Self { india, imf }
    }

    /// Dataset for a source.
    pub fn dataset(&self, source: DataSource) -> &Dataset {
        match source {
            DataSource::India => &self.india,
            DataSource::Imf => &self.imf,
        }
    }

    /// Find a record in any dataset.
    pub fn find(&self, id: &str) -> Option<(DataSource, &DatasetRecord)> {
        DataSource::ALL
            .into_iter()
            .find_map(|source| self.dataset(source).get(id).map(|r| (source, r)))
    }
}

fn load_dataset(source: DataSource, path: Option<&Path>) -> Result<Dataset> {
    let document = match path {
        Some(path) => {
            if !path.exists() {
                return Err(CatalogError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            let content = std::fs::read_to_string(path).map_err(|e| {
                CatalogError::io(format!("Failed to read dataset: {}", path.display()), e)
            })?;
            debug!(source = %source, path = %path.display(), "Loading dataset from file");
            DatasetDocument::from_json(source, &content)?
        }
        None => {
            let embedded = match source {
                DataSource::India => INDIA_DOCUMENT,
                DataSource::Imf => IMF_DOCUMENT,
            };
            DatasetDocument::from_json(source, embedded)?
        }
    };

    Ok(Dataset::from_document(source, document))
}
