//! Macros for reducing boilerplate when defining records
//!
//! Every typed record shares the same identity and timestamp fields, the
//! same serde conventions (`_id`, camelCase keys, every field defaulted so a
//! sparse backend document still decodes) and a [`Record`] implementation
//! that exposes fields by name to the list view.
//!
//! [`Record`]: crate::core::record::Record

/// Does a snake_case field name match a requested field name?
///
/// Both the Rust name (`order_status`) and the wire name (`orderStatus`)
/// match.
#[doc(hidden)]
pub fn field_matches(snake: &str, requested: &str) -> bool {
    if snake == requested {
        return true;
    }

    let mut wanted = requested.chars();
    let mut upper_next = false;
    for c in snake.chars() {
        if c == '_' {
            upper_next = true;
            continue;
        }
        let c = if upper_next {
            upper_next = false;
            c.to_ascii_uppercase()
        } else {
            c
        };
        if wanted.next() != Some(c) {
            return false;
        }
    }
    wanted.next().is_none()
}

/// Define a record type with automatic trait implementations
///
/// Injects `id` (serialized as `_id`; a plain `id` key is accepted too) and `created_at`
/// (`createdAt`) ahead of the specific fields. Field types must implement
/// [`ToFieldValue`](crate::core::field::ToFieldValue).
///
/// # Example
///
/// ```rust,ignore
/// impl_record!(
///     /// A product tag
///     Tag,
///     "tags",
///     ["name"],
///     {
///         name: String,
///         is_active: bool,
///     }
/// );
///
/// let tag: Tag = serde_json::from_value(json!({"_id": "t1", "name": "Sale"}))?;
/// assert_eq!(tag.field_value("isActive"), Some(FieldValue::Boolean(false)));
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $(#[$meta:meta])*
        $type:ident,
        $resource:expr,
        [ $( $search_field:expr ),* $(,)? ],
        {
            $( $(#[$field_meta:meta])* $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $type {
            /// Server-assigned identifier
            #[serde(rename = "_id")]
            pub id: $crate::core::record::RecordId,

            /// Plain `id` key some endpoints send instead of `_id`
            #[doc(hidden)]
            #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
            pub plain_id: Option<$crate::core::record::RecordId>,

            /// When the backend created this record
            #[serde(skip_serializing_if = "Option::is_none")]
            pub created_at: Option<::chrono::DateTime<::chrono::Utc>>,

            $( $(#[$field_meta])* pub $field : $field_type ),*
        }

        impl $crate::core::record::Record for $type {
            fn resource_name() -> &'static str {
                $resource
            }

            fn search_fields() -> &'static [&'static str] {
                &[ $( $search_field ),* ]
            }

            fn id(&self) -> $crate::core::record::RecordId {
                match &self.plain_id {
                    Some(plain) if self.id.is_empty() => plain.clone(),
                    _ => self.id.clone(),
                }
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                use $crate::core::field::ToFieldValue;
                use $crate::entities::macros::field_matches;

                if field == "_id" || field == "id" {
                    return Some($crate::core::record::Record::id(self).to_field_value());
                }
                if field_matches("created_at", field) {
                    return Some(self.created_at.to_field_value());
                }
                $(
                    if field_matches(stringify!($field), field) {
                        return Some(self.$field.to_field_value());
                    }
                )*
                None
            }
        }
    };
}
