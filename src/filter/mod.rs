//! Filter engine.
//!
//! Narrows a dataset's records in three fixed stages:
//!
//! 1. **Selection**: the source's [`HierarchyStrategy`] resolves the
//!    selection path into a [`SelectionPredicate`].
//! 2. **Search**: case-insensitive substring match over title, category,
//!    subcategory and subset.
//! 3. **Flag**: only records with the active flag set.
//!
//! Filtering is stable (input order is kept) and idempotent.

pub mod facets;
mod hierarchy;

pub use hierarchy::{FieldCheck, HierarchyStrategy, SelectionPredicate};

use serde::{Deserialize, Serialize};

use crate::flags::FlagStore;
use crate::model::{DataSource, DatasetRecord, FlagKind, SelectionPath};
use crate::resolver::CodeTables;

/// Everything that narrows the record list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Sidebar drill-down.
    #[serde(default)]
    pub selection: SelectionPath,
    /// Free-text search. Empty disables the stage.
    #[serde(default)]
    pub query: String,
    /// Flag filter, if any.
    #[serde(default)]
    pub active_flag: Option<FlagKind>,
}

impl FilterCriteria {
    /// No filtering at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection path.
    #[must_use]
    pub fn with_selection(mut self, selection: SelectionPath) -> Self {
        self.selection = selection;
        self
    }

    /// Set the search text.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the flag filter.
    #[must_use]
    pub fn with_flag(mut self, flag: FlagKind) -> Self {
        self.active_flag = Some(flag);
        self
    }
}

/// Filter pipeline bound to one data source.
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine<'t> {
    strategy: HierarchyStrategy<'t>,
}

impl<'t> FilterEngine<'t> {
    /// Engine for a data source.
    pub fn new(source: DataSource, tables: &'t CodeTables) -> Self {
        Self {
            strategy: HierarchyStrategy::for_kind(source.hierarchy(), tables),
        }
    }

    /// Engine with an explicit strategy.
    pub fn with_strategy(strategy: HierarchyStrategy<'t>) -> Self {
        Self { strategy }
    }

    /// Run all three stages, keeping input order.
    pub fn filter<'r, I>(
        &self,
        records: I,
        criteria: &FilterCriteria,
        flags: &FlagStore,
    ) -> Vec<&'r DatasetRecord>
    where
        I: IntoIterator<Item = &'r DatasetRecord>,
    {
        let predicate = self.strategy.apply(&criteria.selection);
        let query = criteria.query.to_lowercase();

        records
            .into_iter()
            .filter(|record| predicate.matches(record))
            .filter(|record| query.is_empty() || matches_query(record, &query))
            .filter(|record| {
                criteria
                    .active_flag
                    .map_or(true, |kind| flags.is_set(&record.id, kind))
            })
            .collect()
    }
}

/// Whether a record matches an already lowercased, non-empty query.
pub fn matches_query(record: &DatasetRecord, lowered_query: &str) -> bool {
    [
        &record.title,
        &record.category,
        &record.subcategory,
        &record.subset,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(lowered_query))
}
