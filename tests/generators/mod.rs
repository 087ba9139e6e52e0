//! Synthetic catalog data generators.
//!
//! Builds dataset documents of arbitrary size with a predictable shape so
//! tests can reason about expected counts without hand-writing fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use datahub_catalog::model::DatasetRecord;
use serde_json::{json, Map, Value};

/// Shape of a generated literal-hierarchy dataset.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Number of top-level categories.
    pub categories: usize,
    /// Subcategories under each category.
    pub subcategories: usize,
    /// Records under each subcategory.
    pub records_per_leaf: usize,
    /// Every n-th record is emitted a second time with the same id.
    pub duplicate_every: Option<usize>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            categories: 3,
            subcategories: 2,
            records_per_leaf: 4,
            duplicate_every: None,
        }
    }
}

impl CatalogConfig {
    /// A handful of records.
    pub fn minimal() -> Self {
        Self {
            categories: 1,
            subcategories: 1,
            records_per_leaf: 3,
            duplicate_every: None,
        }
    }

    /// Enough records to span many pages.
    pub fn large() -> Self {
        Self {
            categories: 10,
            subcategories: 10,
            records_per_leaf: 20,
            duplicate_every: Some(7),
        }
    }

    /// Number of unique records this config produces.
    pub fn unique_records(&self) -> usize {
        self.categories * self.subcategories * self.records_per_leaf
    }
}

/// Category label for an index.
pub fn category_label(index: usize) -> String {
    format!("Category {index}")
}

/// Subcategory label for an index.
pub fn subcategory_label(index: usize) -> String {
    format!("Sub {index}")
}

/// Generate the records, including configured duplicates.
pub fn generate_records(config: &CatalogConfig) -> Vec<DatasetRecord> {
    let mut records = Vec::new();
    let mut serial = 0usize;

    for c in 0..config.categories {
        for s in 0..config.subcategories {
            for r in 0..config.records_per_leaf {
                serial += 1;
                let subset = if r % 2 == 0 { "Even" } else { "Odd" };
                let record = DatasetRecord::new(
                    format!("GEN.{c}.{s}.{r}"),
                    format!("Generated series {serial}"),
                    category_label(c),
                    subcategory_label(s),
                    subset,
                );
                records.push(record.clone());

                if config
                    .duplicate_every
                    .is_some_and(|every| every > 0 && serial % every == 0)
                {
                    let mut duplicate = record;
                    duplicate.title = format!("Duplicate of {serial}");
                    records.push(duplicate);
                }
            }
        }
    }

    records
}

/// Generate a complete dataset document.
pub fn generate_document(config: &CatalogConfig) -> Value {
    let mut categories = Map::new();
    for c in 0..config.categories {
        let mut subs = Map::new();
        for s in 0..config.subcategories {
            subs.insert(subcategory_label(s), json!({"Even": {}, "Odd": {}}));
        }
        categories.insert(category_label(c), Value::Object(subs));
    }

    json!({
        "frequent": generate_records(config),
        "categories": categories,
    })
}

/// Write a generated document to `dir/name`.
pub fn write_document(dir: &Path, name: &str, config: &CatalogConfig) -> PathBuf {
    let path = dir.join(name);
    let content = serde_json::to_string_pretty(&generate_document(config))
        .expect("generated document serializes");
    std::fs::write(&path, content).expect("write generated document");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_minimal() {
        let records = generate_records(&CatalogConfig::minimal());
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_duplicates_added() {
        let config = CatalogConfig::large();
        let records = generate_records(&config);
        assert_eq!(records.len(), config.unique_records() + config.unique_records() / 7);
    }
}
