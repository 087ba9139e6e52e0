//! Browsing session state and the derived view.
//!
//! [`BrowserState`] is what a presentation layer holds between events: the
//! data source, the sidebar selection, the search text, the flag filter and
//! the requested page. Each event applies the reset rules of the catalog
//! (changing the source clears everything, narrowing a level clears the
//! levels below it, any change to the effective filter returns to page 1).
//!
//! [`BrowseView`] is computed from a state in one pass and holds everything
//! needed to render a page.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::filter::{FilterCriteria, FilterEngine};
use crate::flags::{flag_filter_count, FlagSet, FlagStore};
use crate::model::{DataSource, DatasetRecord, FlagKind, SelectionPath};
use crate::pagination::PageState;
use crate::resolver::CodeTables;

/// Heading used when no level is selected.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Text shown for an empty result.
pub const NO_DATA: &str = "No data found";

/// Mutable browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserState {
    source: DataSource,
    criteria: FilterCriteria,
    page: PageState,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new(DataSource::default(), PageState::default().page_size)
    }
}

impl BrowserState {
    /// Fresh state on page 1.
    pub fn new(source: DataSource, page_size: usize) -> Self {
        Self {
            source,
            criteria: FilterCriteria::new(),
            page: PageState::new(page_size),
        }
    }

    /// Current data source.
    pub fn source(&self) -> DataSource {
        self.source
    }

    /// Current selection path.
    pub fn selection(&self) -> &SelectionPath {
        &self.criteria.selection
    }

    /// Current search text.
    pub fn query(&self) -> &str {
        &self.criteria.query
    }

    /// Active flag filter.
    pub fn active_flag(&self) -> Option<FlagKind> {
        self.criteria.active_flag
    }

    /// Filter criteria derived from the state.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.page.current
    }

    /// Records per page.
    pub fn page_size(&self) -> usize {
        self.page.page_size
    }

    /// Switch data source, clearing selection, search and flag filter.
    pub fn set_source(&mut self, source: DataSource) {
        self.source = source;
        self.criteria = FilterCriteria::new();
        self.page.reset();
    }

    /// Select a first-level label; the same label again deselects it.
    pub fn select_category(&mut self, label: impl Into<String>) {
        let selection = &mut self.criteria.selection;
        toggle_label(&mut selection.category, label.into());
        selection.subcategory = None;
        selection.subset = None;
        self.page.reset();
    }

    /// Select a second-level label; the same label again deselects it.
    pub fn select_subcategory(&mut self, label: impl Into<String>) {
        let selection = &mut self.criteria.selection;
        toggle_label(&mut selection.subcategory, label.into());
        selection.subset = None;
        self.page.reset();
    }

    /// Select a third-level label; the same label again deselects it.
    pub fn select_subset(&mut self, label: impl Into<String>) {
        toggle_label(&mut self.criteria.selection.subset, label.into());
        self.page.reset();
    }

    /// Replace the search text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.page.reset();
    }

    /// Toggle a flag filter; the active kind again clears it.
    pub fn toggle_flag_filter(&mut self, kind: FlagKind) {
        self.criteria.active_flag = if self.criteria.active_flag == Some(kind) {
            None
        } else {
            Some(kind)
        };
        self.page.reset();
    }

    /// Move to `page`, clamped into the pages that `total_items` filtered
    /// records fill. Returns the page actually stored.
    pub fn go_to_page(&mut self, page: i64, total_items: usize) -> usize {
        self.page.go_to(page, total_items)
    }
}

fn toggle_label(slot: &mut Option<String>, label: String) {
    *slot = if slot.as_deref() == Some(label.as_str()) {
        None
    } else {
        Some(label)
    };
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow<'a> {
    /// The record.
    pub record: &'a DatasetRecord,
    /// Category trail shown under the title.
    pub breadcrumb: String,
    /// Current flags.
    pub flags: FlagSet,
}

/// Everything needed to render one page of a browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseView<'a> {
    /// Source being browsed.
    pub source: DataSource,
    /// Source display name.
    pub source_name: &'static str,
    /// List heading with the filtered count.
    pub heading: String,
    /// Number of records after filtering.
    pub total_items: usize,
    /// Page after clamping.
    pub page: usize,
    /// Total pages, at least 1.
    pub total_pages: usize,
    /// "Showing X to Y of N records".
    pub showing: String,
    /// Rows on this page.
    pub rows: Vec<RecordRow<'a>>,
    /// Records flagged `plus` anywhere in the source dataset.
    pub cart_count: usize,
}

impl<'a> BrowseView<'a> {
    /// Filter, paginate and decorate one dataset.
    pub fn build(
        dataset: &'a Dataset,
        tables: &CodeTables,
        flags: &FlagStore,
        state: &BrowserState,
    ) -> Self {
        let source = dataset.source();
        let engine = FilterEngine::new(source, tables);
        let filtered = engine.filter(dataset.records(), state.criteria(), flags);

        let page = state.page.slice(&filtered);

        let rows = page
            .items
            .iter()
            .map(|&record| RecordRow {
                record,
                breadcrumb: breadcrumb(source, record),
                flags: flags.get(&record.id),
            })
            .collect();

        Self {
            source,
            source_name: source.display_name(),
            heading: heading(source, state.selection(), filtered.len()),
            total_items: filtered.len(),
            page: page.page,
            total_pages: page.total_pages,
            showing: page.showing(),
            rows,
            cart_count: flag_filter_count(dataset.records(), flags, FlagKind::Plus),
        }
    }

    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// Whether page navigation is worth showing.
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }
}

/// List heading for a selection and filtered count.
pub fn heading(source: DataSource, selection: &SelectionPath, count: usize) -> String {
    let label = match source {
        DataSource::Imf => match (&selection.category, &selection.subcategory, &selection.subset) {
            (_, Some(country), Some(indicator)) => format!("{country} / {indicator}"),
            (_, Some(country), None) => country.clone(),
            (Some(region), None, _) => region.clone(),
            (None, None, _) => ALL_CATEGORIES.to_string(),
        },
        DataSource::India => selection
            .category
            .clone()
            .unwrap_or_else(|| ALL_CATEGORIES.to_string()),
    };
    format!("{label} ({count})")
}

/// Category trail for a row.
pub fn breadcrumb(source: DataSource, record: &DatasetRecord) -> String {
    match source {
        DataSource::Imf => format!(
            "{} / {} / {}",
            record.region.as_deref().unwrap_or("N/A"),
            record.category,
            record.subcategory
        ),
        DataSource::India if record.subset.is_empty() => {
            format!("{} / {}", record.category, record.subcategory)
        }
        DataSource::India => format!(
            "{} / {} / {}",
            record.category, record.subcategory, record.subset
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_change_resets_everything() {
        let mut state = BrowserState::new(DataSource::India, 10);
        state.select_category("Economy");
        state.select_subcategory("Prices");
        state.set_query("cpi");
        state.toggle_flag_filter(FlagKind::Pin);
        state.go_to_page(3, 40);

        state.set_source(DataSource::Imf);
        assert_eq!(state.source(), DataSource::Imf);
        assert!(state.selection().is_empty());
        assert_eq!(state.query(), "");
        assert_eq!(state.active_flag(), None);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_category_toggle_and_cascade() {
        let mut state = BrowserState::default();
        state.select_category("Economy");
        state.select_subcategory("Prices");
        state.select_subset("CPI");

        state.select_category("Industry");
        assert_eq!(state.selection().category.as_deref(), Some("Industry"));
        assert_eq!(state.selection().subcategory, None);
        assert_eq!(state.selection().subset, None);

        state.select_category("Industry");
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_subcategory_clears_subset() {
        let mut state = BrowserState::default();
        state.select_category("Economy");
        state.select_subcategory("Prices");
        state.select_subset("CPI");
        state.select_subcategory("National Accounts");
        assert_eq!(state.selection().subset, None);
        assert_eq!(state.selection().category.as_deref(), Some("Economy"));

        state.select_subset("GDP");
        state.select_subset("GDP");
        assert_eq!(state.selection().subset, None);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut state = BrowserState::default();
        state.go_to_page(4, 40);
        state.set_query("gdp");
        assert_eq!(state.page(), 1);

        state.go_to_page(2, 40);
        state.toggle_flag_filter(FlagKind::Plus);
        assert_eq!(state.page(), 1);
        assert_eq!(state.active_flag(), Some(FlagKind::Plus));

        state.toggle_flag_filter(FlagKind::Plus);
        assert_eq!(state.active_flag(), None);

        state.go_to_page(-3, 40);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_go_to_page_stores_clamped_page() {
        let mut state = BrowserState::new(DataSource::India, 10);
        assert_eq!(state.go_to_page(999, 22), 3);
        assert_eq!(state.page(), 3);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["page"]["current"], 3);

        assert_eq!(state.go_to_page(2, 0), 1);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_headings() {
        let imf = SelectionPath::new()
            .with_category("Americas")
            .with_subcategory("Brazil")
            .with_subset("Prices");
        assert_eq!(heading(DataSource::Imf, &imf, 1), "Brazil / Prices (1)");
        let japan = SelectionPath::new()
            .with_category("Asia")
            .with_subcategory("Japan");
        assert_eq!(heading(DataSource::Imf, &japan, 4), "Japan (4)");
        assert_eq!(
            heading(DataSource::Imf, &SelectionPath::new().with_category("Asia"), 8),
            "Asia (8)"
        );
        assert_eq!(heading(DataSource::Imf, &SelectionPath::new(), 40), "All Categories (40)");
        assert_eq!(heading(DataSource::India, &imf, 2), "Americas (2)");
        assert_eq!(heading(DataSource::India, &SelectionPath::new(), 0), "All Categories (0)");
    }

    #[test]
    fn test_breadcrumbs() {
        let with_subset = DatasetRecord::new("a", "A", "Economy", "Prices", "CPI");
        let without_subset = DatasetRecord::new("b", "B", "Economy", "Money & Banking", "");
        assert_eq!(breadcrumb(DataSource::India, &with_subset), "Economy / Prices / CPI");
        assert_eq!(breadcrumb(DataSource::India, &without_subset), "Economy / Money & Banking");

        let imf = DatasetRecord::new("c", "C", "Prices", "CPI", "").with_region("JPN");
        assert_eq!(breadcrumb(DataSource::Imf, &imf), "JPN / Prices / CPI");
        let unplaced = DatasetRecord::new("d", "D", "Prices", "CPI", "");
        assert_eq!(breadcrumb(DataSource::Imf, &unplaced), "N/A / Prices / CPI");
    }
}
