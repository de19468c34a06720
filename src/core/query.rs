//! Search, categorical filter and sort parameters of a list view

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel shown first in every categorical filter dropdown
pub const ALL: &str = "All";

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort field and direction
///
/// # Format
/// - `field:asc` or `field` (ascending)
/// - `field:desc` (descending)
///
/// # Example
/// ```
/// use storefront::core::query::{SortDirection, SortSpec};
///
/// let spec: SortSpec = "price:desc".parse().unwrap();
/// assert_eq!(spec.field, "price");
/// assert_eq!(spec.direction, SortDirection::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            field: self.field.clone(),
            direction: self.direction.reversed(),
        }
    }
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some((field, "desc")) => (field, SortDirection::Desc),
            Some((_, other)) => return Err(format!("unknown sort direction '{}'", other)),
            None => (s, SortDirection::Asc),
        };
        let field = field.trim();
        if field.is_empty() {
            return Err("sort field is empty".to_string());
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.field, dir)
    }
}

/// Equality filter on one field; `value == None` means "All"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub field: String,
    pub value: Option<String>,
}

impl CategoryFilter {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: None,
        }
    }

    /// Select a value; the [`ALL`] sentinel clears the filter
    pub fn select(&mut self, value: &str) {
        self.value = if value == ALL {
            None
        } else {
            Some(value.to_string())
        };
    }

    pub fn is_active(&self) -> bool {
        self.value.is_some()
    }
}

/// Everything that decides which rows a list view shows, and in which order
///
/// Exists only for the lifetime of a screen; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub filter: Option<CategoryFilter>,
    pub sort: Option<SortSpec>,
}

impl ListQuery {
    /// Search text as matched: trimmed and lowercased
    pub fn folded_search(&self) -> String {
        self.search.trim().to_lowercase()
    }
}
