use crate::client::ActionMethod;
use crate::core::error::AdminError;
use crate::core::query::SortDirection;
use crate::core::record::RecordId;
use crate::mutation::Mutation;
use crate::view::{ListView, SortPreset};
use serde_json::json;

crate::impl_record!(
    /// A product category with its subcategory names
    Category,
    "categories",
    ["name", "subcategories"],
    {
        name: String,
        subcategories: Vec<String>,
    }
);

pub const SORT_PRESETS: &[SortPreset] = &[
    SortPreset::new("asc", "A → Z", "name", SortDirection::Asc),
    SortPreset::new("desc", "Z → A", "name", SortDirection::Desc),
];

/// The categories screen: search names and subcategories, filter by name
pub fn list_view() -> ListView<Category> {
    ListView::new()
        .with_filter_field("name")
        .with_sort(SORT_PRESETS[0].spec())
}

fn required_name(name: &str) -> Result<String, AdminError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AdminError::field("name", "Category name cannot be empty"));
    }
    Ok(name.to_string())
}

pub fn create(name: &str) -> Result<Mutation, AdminError> {
    let name = required_name(name)?;
    Ok(Mutation::create(json!({ "name": name, "subcategories": [] })))
}

/// `PUT /{id}/edit-name`
pub fn edit_name(id: RecordId, name: &str) -> Result<Mutation, AdminError> {
    let name = required_name(name)?;
    Ok(Mutation::action(
        ActionMethod::Put,
        id,
        "edit-name",
        Some(json!({ "name": name })),
    ))
}

/// `PUT /{id}/add-subcategories`
///
/// Blank names are dropped; nothing left to add is an error.
pub fn add_subcategories<I, S>(id: RecordId, names: I) -> Result<Mutation, AdminError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: Vec<String> = names
        .into_iter()
        .map(|n| n.as_ref().trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        return Err(AdminError::field(
            "subcategories",
            "Subcategory name cannot be empty",
        ));
    }
    Ok(Mutation::action(
        ActionMethod::Put,
        id,
        "add-subcategories",
        Some(json!({ "subcategories": names })),
    ))
}

pub fn delete(id: RecordId) -> Mutation {
    Mutation::delete(id).confirm_with("Are you sure you want to delete this category?")
}
