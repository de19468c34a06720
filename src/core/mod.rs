//! Core module containing the types every screen shares

pub mod error;
pub mod field;
pub mod notice;
pub mod query;
pub mod record;
pub mod validation;

pub use error::{AdminError, ConfigError, ValidationError};
pub use field::{FieldValue, ToFieldValue};
pub use notice::{Notice, NoticeLevel, Notices};
pub use query::{ALL, CategoryFilter, ListQuery, SortDirection, SortSpec};
pub use record::{JsonRecord, Record, RecordId};
