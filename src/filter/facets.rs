//! Sidebar facets derived from record fields.

use std::collections::BTreeSet;

use crate::model::DatasetRecord;

/// Distinct non-empty subcategories of records in `category`, sorted.
pub fn subcategories_of<'a, I>(records: I, category: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a DatasetRecord>,
{
    records
        .into_iter()
        .filter(|record| record.category == category)
        .map(|record| record.subcategory.as_str())
        .filter(|subcategory| !subcategory.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct non-empty subsets of records in `category` / `subcategory`, sorted.
pub fn subsets_of<'a, I>(records: I, category: &str, subcategory: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a DatasetRecord>,
{
    records
        .into_iter()
        .filter(|record| record.category == category && record.subcategory == subcategory)
        .map(|record| record.subset.as_str())
        .filter(|subset| !subset.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
