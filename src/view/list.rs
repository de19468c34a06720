//! The list view model shared by every screen

use crate::core::query::{CategoryFilter, ListQuery, SortSpec};
use crate::core::record::{Record, RecordId};
use crate::view::filter::{filter_options, matches_category, matches_search};
use crate::view::sort::{SortPreset, sort_indices};

/// Snapshot of a collection plus the search, filter and sort that derive
/// the visible rows
///
/// Every setter recomputes the derived view before returning, so
/// [`ListView::rows`] always reflects the current inputs. The view is a list
/// of positions into the snapshot; the snapshot itself is only replaced or
/// patched by the screen that owns it.
///
/// # Example
/// ```rust,ignore
/// let mut view: ListView<Order> = ListView::new().with_filter_field("orderStatus");
/// view.replace_snapshot(orders);
/// view.set_search("lamp");
/// view.set_filter("Pending");
/// view.set_sort(SortSpec::desc("totalAmount"));
/// for order in view.rows() { /* ... */ }
/// ```
#[derive(Debug, Clone)]
pub struct ListView<T: Record> {
    snapshot: Vec<T>,
    search_fields: Vec<String>,
    query: ListQuery,
    visible: Vec<usize>,
}

impl<T: Record> Default for ListView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> ListView<T> {
    /// Empty view searching the record type's default fields
    pub fn new() -> Self {
        Self {
            snapshot: Vec::new(),
            search_fields: T::search_fields().iter().map(|f| f.to_string()).collect(),
            query: ListQuery::default(),
            visible: Vec::new(),
        }
    }

    /// Search these fields instead of the record type's defaults
    pub fn with_search_fields(mut self, fields: &[&str]) -> Self {
        self.search_fields = fields.iter().map(|f| f.to_string()).collect();
        self.recompute();
        self
    }

    /// Enable the categorical filter on `field` (initially "All")
    pub fn with_filter_field(mut self, field: impl Into<String>) -> Self {
        self.query.filter = Some(CategoryFilter::new(field));
        self.recompute();
        self
    }

    /// Start with a sort applied
    pub fn with_sort(mut self, spec: SortSpec) -> Self {
        self.query.sort = Some(spec);
        self.recompute();
        self
    }

    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Replace the whole snapshot (after a list fetch)
    pub fn replace_snapshot(&mut self, records: Vec<T>) {
        self.snapshot = records;
        self.recompute();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.recompute();
    }

    /// Select a filter value; `"All"` clears the filter
    ///
    /// Ignored when the view has no filter field.
    pub fn set_filter(&mut self, value: &str) {
        match self.query.filter.as_mut() {
            Some(filter) => filter.select(value),
            None => {
                tracing::debug!("List view has no filter field; ignoring '{}'", value);
                return;
            }
        }
        self.recompute();
    }

    pub fn clear_filter(&mut self) {
        if let Some(filter) = self.query.filter.as_mut() {
            filter.value = None;
        }
        self.recompute();
    }

    pub fn set_sort(&mut self, spec: SortSpec) {
        self.query.sort = Some(spec);
        self.recompute();
    }

    pub fn apply_preset(&mut self, preset: &SortPreset) {
        self.set_sort(preset.spec());
    }

    /// Flip the direction of the current sort, if any
    pub fn toggle_direction(&mut self) {
        if let Some(spec) = self.query.sort.take() {
            self.query.sort = Some(spec.reversed());
        }
        self.recompute();
    }

    /// Back to snapshot order
    pub fn clear_sort(&mut self) {
        self.query.sort = None;
        self.recompute();
    }

    /// Replace the record with the same id, or append it
    pub fn upsert(&mut self, record: T) {
        let id = record.id();
        match self.snapshot.iter_mut().find(|r| r.id() == id) {
            Some(existing) => *existing = record,
            None => self.snapshot.push(record),
        }
        self.recompute();
    }

    /// Drop a record from the snapshot
    pub fn remove(&mut self, id: &RecordId) -> Option<T> {
        let position = self.snapshot.iter().position(|r| &r.id() == id)?;
        let removed = self.snapshot.remove(position);
        self.recompute();
        Some(removed)
    }

    pub fn find(&self, id: &RecordId) -> Option<&T> {
        self.snapshot.iter().find(|r| &r.id() == id)
    }

    /// The derived view: filtered, then sorted
    pub fn rows(&self) -> impl Iterator<Item = &T> + '_ {
        self.visible.iter().filter_map(|&i| self.snapshot.get(i))
    }

    /// Number of visible rows
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// `"All"` plus the distinct values of the filter field in the snapshot
    pub fn filter_options(&self) -> Vec<String> {
        match &self.query.filter {
            Some(filter) => filter_options(&self.snapshot, &filter.field),
            None => Vec::new(),
        }
    }

    fn recompute(&mut self) {
        let needle = self.query.folded_search();
        let mut visible: Vec<usize> = self
            .snapshot
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                matches_search(*record, &self.search_fields, &needle)
                    && matches_category(*record, self.query.filter.as_ref())
            })
            .map(|(i, _)| i)
            .collect();

        if let Some(spec) = &self.query.sort {
            sort_indices(&self.snapshot, &mut visible, spec);
        }
        self.visible = visible;
    }
}
