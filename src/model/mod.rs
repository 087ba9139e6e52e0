//! Core data structures for the catalog.
//!
//! - [`DatasetRecord`]: one dataset descriptor (a catalog row)
//! - [`DataSource`]: which of the two datasets is being browsed
//! - [`SelectionPath`]: the current drill-down through the category tree
//! - [`FlagKind`]: the four per-record markers
//! - [`CategoryTree`]: the navigation hierarchy of a dataset

mod tree;

pub use tree::CategoryTree;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CatalogError;

/// One dataset descriptor.
///
/// Field names on the wire follow the published catalog documents
/// (`cat`, `subCat`, `freq`, `src`, `sData`, `datatype`). Every text field
/// tolerates absence or `null` and falls back to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetRecord {
    /// Unique key within a dataset.
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    /// Display title.
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    /// Top-level category (indicator category for the IMF dataset).
    #[serde(rename = "cat", deserialize_with = "lenient_string")]
    pub category: String,
    /// Second-level category.
    #[serde(rename = "subCat", deserialize_with = "lenient_string")]
    pub subcategory: String,
    /// Third-level category, often empty.
    #[serde(deserialize_with = "lenient_string")]
    pub subset: String,
    /// Frequency label (e.g. "Monthly").
    #[serde(rename = "freq", deserialize_with = "lenient_string")]
    pub frequency: String,
    /// Unit label.
    #[serde(deserialize_with = "lenient_string")]
    pub unit: String,
    /// Publishing source label.
    #[serde(rename = "src", deserialize_with = "lenient_string")]
    pub source: String,
    /// Sample-data label.
    #[serde(rename = "sData", deserialize_with = "lenient_string")]
    pub sample_data: String,
    /// Data-type label.
    #[serde(rename = "datatype", deserialize_with = "lenient_string")]
    pub data_type: String,
    /// Three-letter region code, IMF dataset only.
    #[serde(
        deserialize_with = "lenient_region",
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<String>,
}

impl DatasetRecord {
    /// Create a record with the hierarchy fields set and everything else empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        subset: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            subcategory: subcategory.into(),
            subset: subset.into(),
            ..Self::default()
        }
    }

    /// Set the region code.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientScalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl From<LenientScalar> for String {
    fn from(value: LenientScalar) -> Self {
        match value {
            LenientScalar::Text(s) => s,
            LenientScalar::Number(n) => n.to_string(),
            LenientScalar::Bool(b) => b.to_string(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LenientScalar>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

// An empty code is treated the same as a missing one.
fn lenient_region<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LenientScalar>::deserialize(deserializer)?
        .map(String::from)
        .filter(|code| !code.is_empty()))
}

/// How a data source's selection path maps onto record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyKind {
    /// Category/subcategory/subset matched literally against record fields.
    Literal,
    /// Region/country resolved through code tables, then indicator category.
    RegionCoded,
}

/// The two datasets the catalog can browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// India & States dataset.
    #[default]
    India,
    /// IMF dataset, region-coded.
    Imf,
}

impl DataSource {
    /// All data sources in display order.
    pub const ALL: [DataSource; 2] = [DataSource::India, DataSource::Imf];

    /// Stable lowercase key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::India => "india",
            Self::Imf => "imf",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::India => "India & States",
            Self::Imf => "IMF",
        }
    }

    /// Hierarchy strategy this source uses.
    #[must_use]
    pub const fn hierarchy(self) -> HierarchyKind {
        match self {
            Self::India => HierarchyKind::Literal,
            Self::Imf => HierarchyKind::RegionCoded,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DataSource {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "india" => Ok(Self::India),
            "imf" => Ok(Self::Imf),
            other => Err(CatalogError::InvalidArgument {
                name: "source".to_string(),
                reason: format!("unknown data source '{other}' (expected india or imf)"),
            }),
        }
    }
}

/// One of the four per-record markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    /// Bookmark.
    Bookmark,
    /// Cart / selected-for-download.
    Plus,
    /// Pin.
    Pin,
    /// More-options marker.
    More,
}

impl FlagKind {
    /// All flags in display order.
    pub const ALL: [FlagKind; 4] = [
        FlagKind::Bookmark,
        FlagKind::Plus,
        FlagKind::Pin,
        FlagKind::More,
    ];

    /// Stable lowercase name, also the persisted field name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bookmark => "bookmark",
            Self::Plus => "plus",
            Self::Pin => "pin",
            Self::More => "more",
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlagKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bookmark" => Ok(Self::Bookmark),
            "plus" | "cart" => Ok(Self::Plus),
            "pin" => Ok(Self::Pin),
            "more" => Ok(Self::More),
            other => Err(CatalogError::InvalidArgument {
                name: "flag".to_string(),
                reason: format!("unknown flag '{other}' (expected bookmark, plus, pin or more)"),
            }),
        }
    }
}

/// Current sidebar drill-down.
///
/// For the India dataset the levels are matched literally against
/// category, subcategory and subset. For the IMF dataset they mean region,
/// country and indicator category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPath {
    /// First level.
    pub category: Option<String>,
    /// Second level.
    pub subcategory: Option<String>,
    /// Third level.
    pub subset: Option<String>,
}

impl SelectionPath {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first level.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the second level.
    #[must_use]
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Set the third level.
    #[must_use]
    pub fn with_subset(mut self, subset: impl Into<String>) -> Self {
        self.subset = Some(subset.into());
        self
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.subcategory.is_none() && self.subset.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_names() {
        let json = r#"{
            "id": "r1", "title": "India GDP", "cat": "Economy", "subCat": "GDP",
            "subset": "", "freq": "Quarterly", "unit": "INR Cr", "src": "MoSPI",
            "sData": "2011-12", "datatype": "Number"
        }"#;
        let record: DatasetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "Economy");
        assert_eq!(record.subcategory, "GDP");
        assert_eq!(record.frequency, "Quarterly");
        assert_eq!(record.sample_data, "2011-12");
        assert_eq!(record.region, None);
    }

    #[test]
    fn test_record_missing_and_null_fields() {
        let record: DatasetRecord =
            serde_json::from_str(r#"{"id": 42, "title": "T", "subset": null, "region": ""}"#)
                .unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.subset, "");
        assert_eq!(record.subcategory, "");
        assert_eq!(record.region, None);
    }

    #[test]
    fn test_record_region_roundtrip() {
        let record = DatasetRecord::new("a", "T", "Labour", "Unemployment", "").with_region("USA");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"region\":\"USA\""));
        assert!(json.contains("\"subCat\":\"Unemployment\""));
    }

    #[test]
    fn test_data_source_parse() {
        assert_eq!("IMF".parse::<DataSource>().unwrap(), DataSource::Imf);
        assert_eq!("india".parse::<DataSource>().unwrap(), DataSource::India);
        assert!("world".parse::<DataSource>().is_err());
        assert_eq!(DataSource::Imf.hierarchy(), HierarchyKind::RegionCoded);
        assert_eq!(DataSource::India.display_name(), "India & States");
    }

    #[test]
    fn test_flag_kind_parse() {
        assert_eq!("cart".parse::<FlagKind>().unwrap(), FlagKind::Plus);
        assert_eq!("Pin".parse::<FlagKind>().unwrap(), FlagKind::Pin);
        assert!("star".parse::<FlagKind>().is_err());
    }

    #[test]
    fn test_selection_path_builder() {
        let path = SelectionPath::new().with_category("Asia").with_subcategory("India");
        assert_eq!(path.category.as_deref(), Some("Asia"));
        assert_eq!(path.subset, None);
        assert!(!path.is_empty());
        assert!(SelectionPath::new().is_empty());
    }
}
