//! Selection-path strategies.
//!
//! Each data source interprets the three levels of a [`SelectionPath`]
//! differently. A [`HierarchyStrategy`] resolves a selection once into a
//! [`SelectionPredicate`], a conjunction of plain field checks that can then
//! be applied to every record without further table lookups.

use indexmap::IndexSet;
use tracing::debug;

use crate::model::{DatasetRecord, HierarchyKind, SelectionPath};
use crate::resolver::CodeTables;

/// One resolved check against a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    /// `record.category == value`.
    CategoryEq(String),
    /// `record.subcategory == value`.
    SubcategoryEq(String),
    /// `record.subset == value`.
    SubsetEq(String),
    /// Region code is one of the set. Records without a region fail.
    RegionIn(IndexSet<String>),
    /// Region code equals the value. Records without a region fail.
    RegionEq(String),
}

impl FieldCheck {
    /// Whether a record passes this check.
    pub fn matches(&self, record: &DatasetRecord) -> bool {
        match self {
            Self::CategoryEq(value) => record.category == *value,
            Self::SubcategoryEq(value) => record.subcategory == *value,
            Self::SubsetEq(value) => record.subset == *value,
            Self::RegionIn(codes) => record
                .region
                .as_deref()
                .is_some_and(|code| codes.contains(code)),
            Self::RegionEq(value) => record.region.as_deref() == Some(value.as_str()),
        }
    }
}

/// Conjunction of field checks. No checks accepts every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPredicate {
    checks: Vec<FieldCheck>,
}

impl SelectionPredicate {
    /// Predicate that accepts everything.
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Add a check.
    #[must_use]
    pub fn and(mut self, check: FieldCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Resolved checks, in application order.
    pub fn checks(&self) -> &[FieldCheck] {
        &self.checks
    }

    /// True when no check applies.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Whether a record passes every check.
    pub fn matches(&self, record: &DatasetRecord) -> bool {
        self.checks.iter().all(|check| check.matches(record))
    }
}

/// How a selection is turned into field checks.
#[derive(Debug, Clone, Copy)]
pub enum HierarchyStrategy<'t> {
    /// Category, subcategory and subset compared literally.
    Literal,
    /// Region and country resolved through code tables; the third level
    /// selects the indicator category.
    RegionCoded(&'t CodeTables),
}

impl<'t> HierarchyStrategy<'t> {
    /// Strategy for a hierarchy kind.
    pub fn for_kind(kind: HierarchyKind, tables: &'t CodeTables) -> Self {
        match kind {
            HierarchyKind::Literal => Self::Literal,
            HierarchyKind::RegionCoded => Self::RegionCoded(tables),
        }
    }

    /// Resolve a selection into a predicate.
    pub fn apply(&self, selection: &SelectionPath) -> SelectionPredicate {
        match self {
            Self::Literal => literal_predicate(selection),
            Self::RegionCoded(tables) => region_coded_predicate(tables, selection),
        }
    }
}

fn literal_predicate(selection: &SelectionPath) -> SelectionPredicate {
    let mut predicate = SelectionPredicate::accept_all();
    if let Some(category) = &selection.category {
        predicate = predicate.and(FieldCheck::CategoryEq(category.clone()));
    }
    if let Some(subcategory) = &selection.subcategory {
        predicate = predicate.and(FieldCheck::SubcategoryEq(subcategory.clone()));
    }
    if let Some(subset) = &selection.subset {
        predicate = predicate.and(FieldCheck::SubsetEq(subset.clone()));
    }
    predicate
}

fn region_coded_predicate(tables: &CodeTables, selection: &SelectionPath) -> SelectionPredicate {
    let mut predicate = SelectionPredicate::accept_all();

    match (&selection.category, &selection.subcategory) {
        // A country narrows further than its region, so it replaces the region test.
        (_, Some(country)) => match tables.countries.code(country) {
            Some(code) => predicate = predicate.and(FieldCheck::RegionEq(code.to_string())),
            None => debug!(country = %country, "Unknown country; skipping country filter"),
        },
        (Some(region), None) => match tables.regions.codes(region) {
            Some(codes) if !codes.is_empty() => {
                predicate = predicate.and(FieldCheck::RegionIn(codes.clone()));
            }
            Some(_) => debug!(region = %region, "Region has no codes; skipping region filter"),
            None => debug!(region = %region, "Unknown region; skipping region filter"),
        },
        (None, None) => {}
    }

    // The third IMF level is the indicator category stored in `cat`.
    if let Some(indicator) = &selection.subset {
        predicate = predicate.and(FieldCheck::CategoryEq(indicator.clone()));
    }

    predicate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{CountryCodeMap, RegionMap};
    use pretty_assertions::assert_eq;

    fn tables() -> CodeTables {
        let regions: RegionMap = vec![
            ("Americas", vec!["BRA", "CAN"]),
            ("Nowhere", Vec::new()),
        ]
        .into_iter()
        .collect();
        let countries: CountryCodeMap = [("United States", "USA"), ("Brazil", "BRA")]
            .into_iter()
            .collect();
        CodeTables::new(regions, countries)
    }

    #[test]
    fn test_literal_builds_conjunction() {
        let selection = SelectionPath::new()
            .with_category("Economy")
            .with_subcategory("Prices")
            .with_subset("CPI");
        let predicate = HierarchyStrategy::Literal.apply(&selection);
        assert_eq!(
            predicate.checks(),
            &[
                FieldCheck::CategoryEq("Economy".into()),
                FieldCheck::SubcategoryEq("Prices".into()),
                FieldCheck::SubsetEq("CPI".into()),
            ]
        );
    }

    #[test]
    fn test_literal_empty_selection_accepts_all() {
        let predicate = HierarchyStrategy::Literal.apply(&SelectionPath::new());
        assert!(predicate.is_empty());
        assert!(predicate.matches(&DatasetRecord::default()));
    }

    #[test]
    fn test_region_resolves_to_code_set() {
        let tables = tables();
        let strategy = HierarchyStrategy::RegionCoded(&tables);
        let predicate = strategy.apply(&SelectionPath::new().with_category("Americas"));

        let usa = DatasetRecord::new("u", "US", "Labour", "", "").with_region("USA");
        let bra = DatasetRecord::new("b", "BR", "Labour", "", "").with_region("BRA");
        let none = DatasetRecord::new("n", "None", "Labour", "", "");

        assert!(!predicate.matches(&usa));
        assert!(predicate.matches(&bra));
        assert!(!predicate.matches(&none));
    }

    #[test]
    fn test_country_supersedes_region() {
        let tables = tables();
        let strategy = HierarchyStrategy::RegionCoded(&tables);
        // USA is not in Americas, but the country check replaces the region check.
        let predicate = strategy.apply(
            &SelectionPath::new()
                .with_category("Americas")
                .with_subcategory("United States"),
        );
        assert_eq!(predicate.checks(), &[FieldCheck::RegionEq("USA".into())]);
    }

    #[test]
    fn test_unknown_and_empty_labels_are_noops() {
        let tables = tables();
        let strategy = HierarchyStrategy::RegionCoded(&tables);
        assert!(strategy
            .apply(&SelectionPath::new().with_category("Nowhere"))
            .is_empty());
        assert!(strategy
            .apply(&SelectionPath::new().with_category("Atlantis"))
            .is_empty());
        assert!(strategy
            .apply(&SelectionPath::new().with_category("Americas").with_subcategory("World"))
            .is_empty());
    }

    #[test]
    fn test_region_coded_subset_checks_category_field() {
        let tables = tables();
        let predicate = HierarchyStrategy::RegionCoded(&tables)
            .apply(&SelectionPath::new().with_subset("Labour Market"));
        assert_eq!(
            predicate.checks(),
            &[FieldCheck::CategoryEq("Labour Market".into())]
        );
    }

    #[test]
    fn test_for_kind() {
        let tables = tables();
        assert!(matches!(
            HierarchyStrategy::for_kind(HierarchyKind::Literal, &tables),
            HierarchyStrategy::Literal
        ));
        assert!(matches!(
            HierarchyStrategy::for_kind(HierarchyKind::RegionCoded, &tables),
            HierarchyStrategy::RegionCoded(_)
        ));
    }
}
