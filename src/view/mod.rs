//! Derived list views: search, categorical filter and sort over a snapshot

pub mod filter;
pub mod list;
pub mod sort;

pub use list::ListView;
pub use sort::SortPreset;
