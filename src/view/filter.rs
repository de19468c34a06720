//! Search and categorical filter predicates

use crate::core::field::FieldValue;
use crate::core::query::{ALL, CategoryFilter};
use crate::core::record::Record;
use indexmap::IndexSet;

/// Does the record contain `folded_needle` in at least one searchable field?
///
/// An empty needle matches every record. Nested list fields match when any
/// of their elements does.
pub fn matches_search<T: Record>(record: &T, fields: &[String], folded_needle: &str) -> bool {
    if folded_needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .filter_map(|field| record.field_value(field))
        .any(|value| value.matches(folded_needle))
}

/// Does the record pass the categorical filter?
///
/// A missing filter or the "All" selection passes everything.
pub fn matches_category<T: Record>(record: &T, filter: Option<&CategoryFilter>) -> bool {
    let Some(CategoryFilter {
        field,
        value: Some(selected),
    }) = filter
    else {
        return true;
    };

    match record.field_value(field) {
        Some(FieldValue::List(items)) => items
            .iter()
            .any(|item| item.display_text().as_deref() == Some(selected.as_str())),
        Some(value) => value.display_text().as_deref() == Some(selected.as_str()),
        None => false,
    }
}

/// Dropdown entries for a categorical filter: `"All"` then each distinct value
pub fn filter_options<T: Record>(records: &[T], field: &str) -> Vec<String> {
    let mut options: IndexSet<String> = IndexSet::new();
    options.insert(ALL.to_string());

    for record in records {
        match record.field_value(field) {
            Some(FieldValue::List(items)) => {
                options.extend(items.iter().filter_map(FieldValue::display_text));
            }
            Some(value) => options.extend(value.display_text()),
            None => {}
        }
    }

    options.into_iter().collect()
}
