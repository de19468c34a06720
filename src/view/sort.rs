//! Record ordering and named sort presets

use crate::core::field::FieldValue;
use crate::core::query::{SortDirection, SortSpec};
use crate::core::record::Record;
use std::cmp::Ordering;

/// Compare two records on the sort field
///
/// A missing field sorts as null, i.e. lowest. Descending inverts the whole
/// comparator, so missing values come last.
pub fn compare_records<T: Record>(a: &T, b: &T, spec: &SortSpec) -> Ordering {
    let x = a.field_value(&spec.field).unwrap_or(FieldValue::Null);
    let y = b.field_value(&spec.field).unwrap_or(FieldValue::Null);
    apply_direction(x.total_cmp(&y), spec.direction)
}

/// Stable sort of `indices` (positions into `records`)
pub fn sort_indices<T: Record>(records: &[T], indices: &mut Vec<usize>, spec: &SortSpec) {
    let mut keyed: Vec<(usize, FieldValue)> = indices
        .iter()
        .map(|&i| {
            let key = records
                .get(i)
                .and_then(|r| r.field_value(&spec.field))
                .unwrap_or(FieldValue::Null);
            (i, key)
        })
        .collect();

    keyed.sort_by(|(_, x), (_, y)| apply_direction(x.total_cmp(y), spec.direction));
    *indices = keyed.into_iter().map(|(i, _)| i).collect();
}

fn apply_direction(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// A sort option as offered in a screen's dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPreset {
    pub key: &'static str,
    pub label: &'static str,
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortPreset {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        field: &'static str,
        direction: SortDirection,
    ) -> Self {
        Self {
            key,
            label,
            field,
            direction,
        }
    }

    pub fn spec(&self) -> SortSpec {
        SortSpec {
            field: self.field.to_string(),
            direction: self.direction,
        }
    }
}

/// Look up a preset by its key
pub fn find_preset<'a>(presets: &'a [SortPreset], key: &str) -> Option<&'a SortPreset> {
    presets.iter().find(|p| p.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::JsonRecord;
    use serde_json::json;

    fn records(values: serde_json::Value) -> Vec<JsonRecord> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn test_missing_field_sorts_lowest() {
        let rows = records(json!([
            {"_id": "a", "price": 5},
            {"_id": "b"},
            {"_id": "c", "price": 1},
        ]));
        let mut indices = vec![0, 1, 2];

        sort_indices(&rows, &mut indices, &SortSpec::asc("price"));
        assert_eq!(indices, vec![1, 2, 0]);

        sort_indices(&rows, &mut indices, &SortSpec::desc("price"));
        assert_eq!(indices, vec![0, 2, 1]);
    }

    #[test]
    fn test_ties_keep_snapshot_order() {
        let rows = records(json!([
            {"_id": "a", "status": "Active"},
            {"_id": "b", "status": "Blocked"},
            {"_id": "c", "status": "Active"},
        ]));
        let mut indices = vec![0, 1, 2];
        sort_indices(&rows, &mut indices, &SortSpec::asc("status"));
        assert_eq!(indices, vec![0, 2, 1]);
    }

    #[test]
    fn test_compare_records_mixed_case_strings() {
        let rows = records(json!([{"name": "banana"}, {"name": "Apple"}]));
        assert_eq!(
            compare_records(&rows[0], &rows[1], &SortSpec::asc("name")),
            Ordering::Greater
        );
        assert_eq!(
            compare_records(&rows[0], &rows[1], &SortSpec::desc("name")),
            Ordering::Less
        );
    }

    #[test]
    fn test_find_preset() {
        const PRESETS: &[SortPreset] = &[
            SortPreset::new("az", "A to Z", "title", SortDirection::Asc),
            SortPreset::new("za", "Z to A", "title", SortDirection::Desc),
        ];
        assert_eq!(find_preset(PRESETS, "za").unwrap().spec(), SortSpec::desc("title"));
        assert!(find_preset(PRESETS, "price").is_none());
    }
}
