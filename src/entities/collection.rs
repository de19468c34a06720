use crate::client::ActionMethod;
use crate::core::error::AdminError;
use crate::core::query::SortDirection;
use crate::core::record::RecordId;
use crate::mutation::{Mutation, Reconcile};
use crate::view::{ListView, SortPreset};
use serde_json::json;

crate::impl_record!(
    /// A curated product collection
    Collection,
    "collections",
    ["title"],
    {
        title: String,
        is_active: bool,
    }
);

pub const SORT_PRESETS: &[SortPreset] = &[
    SortPreset::new("az", "A → Z", "title", SortDirection::Asc),
    SortPreset::new("za", "Z → A", "title", SortDirection::Desc),
    SortPreset::new("latest", "Latest", "createdAt", SortDirection::Desc),
    SortPreset::new("oldest", "Oldest", "createdAt", SortDirection::Asc),
];

pub fn list_view() -> ListView<Collection> {
    ListView::new()
}

fn required_title(title: &str) -> Result<String, AdminError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AdminError::field("title", "Collection title cannot be empty"));
    }
    Ok(title.to_string())
}

// Every collection write refetches the list.

pub fn create(title: &str) -> Result<Mutation, AdminError> {
    let title = required_title(title)?;
    Ok(Mutation::create(json!({ "title": title })).with_reconcile(Reconcile::Refetch))
}

/// `PUT /{id}/edit-name`
pub fn edit_name(id: RecordId, title: &str) -> Result<Mutation, AdminError> {
    let title = required_title(title)?;
    Ok(Mutation::action(
        ActionMethod::Put,
        id,
        "edit-name",
        Some(json!({ "title": title })),
    )
    .with_reconcile(Reconcile::Refetch))
}

/// `PATCH /{id}/toggle-status`
pub fn toggle_status(id: RecordId) -> Mutation {
    Mutation::toggle(id).with_reconcile(Reconcile::Refetch)
}

pub fn delete(id: RecordId) -> Mutation {
    Mutation::delete(id)
        .confirm_with("Are you sure you want to delete this collection?")
        .with_reconcile(Reconcile::Refetch)
}
