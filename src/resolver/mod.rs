//! Category resolution.
//!
//! Exposes the navigation tree of each data source and, for the
//! region-coded IMF dataset, the tables that translate human-readable tree
//! labels (region names, country names) into the codes stored on records.
//! Nothing here fails: unknown labels resolve to `None` and missing
//! subtrees have no children.

mod tables;

use indexmap::{IndexMap, IndexSet};

use crate::dataset::Repository;
use crate::model::{CategoryTree, DataSource};

/// Region display name → ordered set of three-letter codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMap {
    regions: IndexMap<String, IndexSet<String>>,
}

impl RegionMap {
    /// The reference table used by the IMF dataset.
    pub fn builtin() -> Self {
        Self {
            regions: tables::BUILTIN_REGIONS.clone(),
        }
    }

    /// Codes for a region, if the region is known.
    pub fn codes(&self, region: &str) -> Option<&IndexSet<String>> {
        self.regions.get(region)
    }

    /// Known region names in table order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}

impl<R, I> FromIterator<(R, I)> for RegionMap
where
    R: Into<String>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (R, I)>>(iter: T) -> Self {
        Self {
            regions: iter
                .into_iter()
                .map(|(region, codes)| {
                    (region.into(), codes.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }
}

/// Country display name → three-letter code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryCodeMap {
    countries: IndexMap<String, String>,
}

impl CountryCodeMap {
    /// The reference table used by the IMF dataset.
    pub fn builtin() -> Self {
        Self {
            countries: tables::BUILTIN_COUNTRIES.clone(),
        }
    }

    /// Code for a country name, if known.
    pub fn code(&self, country: &str) -> Option<&str> {
        self.countries.get(country).map(String::as_str)
    }

    /// Number of known names.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// True when the table is empty.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for CountryCodeMap {
    fn from_iter<T: IntoIterator<Item = (N, C)>>(iter: T) -> Self {
        Self {
            countries: iter
                .into_iter()
                .map(|(name, code)| (name.into(), code.into()))
                .collect(),
        }
    }
}

/// Both reference tables, read-only for the life of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTables {
    /// Region table.
    pub regions: RegionMap,
    /// Country table.
    pub countries: CountryCodeMap,
}

impl CodeTables {
    /// Built-in tables.
    pub fn builtin() -> Self {
        Self {
            regions: RegionMap::builtin(),
            countries: CountryCodeMap::builtin(),
        }
    }

    /// Custom tables, mostly for tests.
    pub fn new(regions: RegionMap, countries: CountryCodeMap) -> Self {
        Self { regions, countries }
    }
}

/// Read access to the category trees of a repository.
#[derive(Debug, Clone, Copy)]
pub struct CategoryResolver<'a> {
    repository: &'a Repository,
}

impl<'a> CategoryResolver<'a> {
    /// Resolver over a repository.
    pub fn new(repository: &'a Repository) -> Self {
        Self { repository }
    }

    /// Top-level tree for a source.
    pub fn categories_for(&self, source: DataSource) -> &'a CategoryTree {
        self.repository.dataset(source).categories()
    }

    /// Children of the node at `path` in a source's tree.
    pub fn children(&self, source: DataSource, path: &[&str]) -> Vec<String> {
        children_of(self.categories_for(source), path)
    }
}

/// Immediate children of the node at `path`, in insertion order.
///
/// An absent node yields an empty list.
pub fn children_of<S: AsRef<str>>(tree: &CategoryTree, path: &[S]) -> Vec<String> {
    tree.node(path)
        .map(|node| node.labels().map(str::to_string).collect())
        .unwrap_or_default()
}
