//! Reusable payload filters
//!
//! These filters transform form field values before submission

use indexmap::IndexMap;
use serde_json::{Value, json};

/// One transformation applied to a field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayloadFilter {
    /// Trim whitespace from strings
    Trim,
    /// Convert strings to uppercase
    Uppercase,
    /// Convert strings to lowercase
    Lowercase,
    /// Round numbers to the given number of decimal places
    RoundDecimals(u32),
}

impl PayloadFilter {
    /// Apply the filter; values of the wrong type pass through unchanged
    pub fn apply(&self, value: Value) -> Value {
        match self {
            PayloadFilter::Trim => map_str(value, |s| s.trim().to_string()),
            PayloadFilter::Uppercase => map_str(value, |s| s.to_uppercase()),
            PayloadFilter::Lowercase => map_str(value, |s| s.to_lowercase()),
            PayloadFilter::RoundDecimals(decimals) => match value.as_f64() {
                Some(num) => {
                    let factor = 10_f64.powi(*decimals as i32);
                    json!((num * factor).round() / factor)
                }
                None => value,
            },
        }
    }
}

fn map_str(value: Value, f: impl Fn(&str) -> String) -> Value {
    match value.as_str() {
        Some(s) => Value::String(f(s)),
        None => value,
    }
}

/// Ordered set of per-field filters
///
/// # Example
/// ```
/// use serde_json::json;
/// use storefront::core::validation::{FilterChain, PayloadFilter};
///
/// let chain = FilterChain::new()
///     .field("code", [PayloadFilter::Trim, PayloadFilter::Uppercase]);
/// let payload = chain.apply(json!({"code": " welcome10 "}));
/// assert_eq!(payload["code"], "WELCOME10");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    fields: IndexMap<String, Vec<PayloadFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register filters for a field; they run in the given order
    pub fn field(
        mut self,
        name: impl Into<String>,
        filters: impl IntoIterator<Item = PayloadFilter>,
    ) -> Self {
        self.fields.entry(name.into()).or_default().extend(filters);
        self
    }

    /// Apply every registered filter to an object payload
    ///
    /// Fields absent from the payload are skipped; non-object payloads are
    /// returned untouched.
    pub fn apply(&self, mut payload: Value) -> Value {
        if let Some(obj) = payload.as_object_mut() {
            for (name, filters) in &self.fields {
                if let Some(slot) = obj.get_mut(name) {
                    let mut value = slot.take();
                    for filter in filters {
                        value = filter.apply(value);
                    }
                    *slot = value;
                }
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === Trim ===

    #[test]
    fn test_trim_removes_whitespace() {
        assert_eq!(PayloadFilter::Trim.apply(json!("  hello  ")), json!("hello"));
    }

    #[test]
    fn test_trim_non_string_passthrough() {
        assert_eq!(PayloadFilter::Trim.apply(json!(42)), json!(42));
        assert_eq!(PayloadFilter::Trim.apply(json!(null)), json!(null));
    }

    // === Uppercase / Lowercase ===

    #[test]
    fn test_uppercase_mixed_case() {
        assert_eq!(
            PayloadFilter::Uppercase.apply(json!("Summer20")),
            json!("SUMMER20")
        );
    }

    #[test]
    fn test_lowercase_non_string_passthrough() {
        assert_eq!(PayloadFilter::Lowercase.apply(json!(true)), json!(true));
    }

    // === RoundDecimals ===

    #[test]
    fn test_round_decimals_two_places() {
        assert_eq!(
            PayloadFilter::RoundDecimals(2).apply(json!(3.14159)),
            json!(3.14)
        );
    }

    #[test]
    fn test_round_decimals_non_number_passthrough() {
        assert_eq!(
            PayloadFilter::RoundDecimals(2).apply(json!("hello")),
            json!("hello")
        );
    }

    // === FilterChain ===

    #[test]
    fn test_chain_runs_filters_in_order() {
        let chain = FilterChain::new()
            .field("name", [PayloadFilter::Trim])
            .field("price", [PayloadFilter::RoundDecimals(2)])
            .field("name", [PayloadFilter::Lowercase]);

        let out = chain.apply(json!({"name": "  New Arrival ", "price": 9.999, "stock": 3}));
        assert_eq!(out, json!({"name": "new arrival", "price": 10.0, "stock": 3}));
    }

    #[test]
    fn test_chain_skips_missing_fields() {
        let chain = FilterChain::new().field("code", [PayloadFilter::Uppercase]);
        assert_eq!(chain.apply(json!({"name": "x"})), json!({"name": "x"}));
        assert_eq!(chain.apply(json!([1, 2])), json!([1, 2]));
    }
}
