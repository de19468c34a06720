use crate::core::error::AdminError;
use crate::core::query::SortDirection;
use crate::core::record::{Record, RecordId};
use crate::core::validation::{self, rule_error};
use crate::mutation::Mutation;
use crate::view::{ListView, SortPreset};
use serde_json::json;
use validator::{Validate, ValidationError};

crate::impl_record!(
    /// A product tag
    Tag,
    "tags",
    ["name"],
    {
        name: String,
    }
);

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this tag?";

pub const SORT_PRESETS: &[SortPreset] = &[
    SortPreset::new("asc", "A → Z", "name", SortDirection::Asc),
    SortPreset::new("desc", "Z → A", "name", SortDirection::Desc),
];

/// The tags screen: filter by tag name, sorted A → Z
pub fn list_view() -> ListView<Tag> {
    ListView::new()
        .with_filter_field("name")
        .with_sort(SORT_PRESETS[0].spec())
}

fn name_present(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(rule_error("blank", "Tag name cannot be empty"));
    }
    Ok(())
}

/// Add/rename form for a tag
#[derive(Debug, Clone, Default, Validate)]
pub struct TagDraft {
    #[validate(custom(function = "name_present"))]
    pub name: String,
}

impl TagDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Validate against the current snapshot
    ///
    /// Names are unique case-insensitively; `editing` is skipped so a tag
    /// can be saved under its own name.
    pub fn check(&self, existing: &[Tag], editing: Option<&RecordId>) -> Result<(), AdminError> {
        validation::check(self)?;

        let folded = self.name.trim().to_lowercase();
        let duplicate = existing
            .iter()
            .filter(|tag| Some(&tag.id()) != editing)
            .any(|tag| tag.name.trim().to_lowercase() == folded);
        if duplicate {
            return Err(AdminError::field("name", "Tag already exists"));
        }
        Ok(())
    }

    pub fn create(&self, existing: &[Tag]) -> Result<Mutation, AdminError> {
        self.check(existing, None)?;
        Ok(Mutation::create(json!({ "name": self.name.trim() })))
    }

    pub fn rename(&self, id: RecordId, existing: &[Tag]) -> Result<Mutation, AdminError> {
        self.check(existing, Some(&id))?;
        Ok(Mutation::update(id, json!({ "name": self.name.trim() })))
    }
}

pub fn delete(id: RecordId) -> Mutation {
    Mutation::delete(id).confirm_with(DELETE_PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::MutationKind;

    fn tags() -> Vec<Tag> {
        serde_json::from_value(json!([
            {"_id": "t1", "name": "Summer Sale"},
            {"_id": "t2", "name": "New"},
        ]))
        .unwrap()
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = TagDraft::new("   ").create(&tags()).unwrap_err();
        assert_eq!(err.user_message(), "Tag name cannot be empty");
    }

    #[test]
    fn test_duplicate_is_case_insensitive() {
        let err = TagDraft::new("summer sale ").create(&tags()).unwrap_err();
        assert_eq!(err.user_message(), "Tag already exists");
    }

    #[test]
    fn test_rename_to_own_name_allowed() {
        let mutation = TagDraft::new("NEW")
            .rename(RecordId::from("t2"), &tags())
            .unwrap();
        assert_eq!(
            mutation.kind,
            MutationKind::Update {
                id: RecordId::from("t2"),
                payload: json!({"name": "NEW"}),
            }
        );
    }

    #[test]
    fn test_rename_with_plain_numeric_ids() {
        let tags: Vec<Tag> = serde_json::from_value(json!([
            {"id": 1, "name": "New"},
            {"id": 2, "name": "Sale"},
        ]))
        .unwrap();

        let mutation = TagDraft::new("NEW")
            .rename(RecordId::from("1"), &tags)
            .unwrap();
        assert_eq!(
            mutation.kind,
            MutationKind::Update {
                id: RecordId::from("1"),
                payload: json!({"name": "NEW"}),
            }
        );

        let err = TagDraft::new("sale")
            .rename(RecordId::from("1"), &tags)
            .unwrap_err();
        assert_eq!(err.user_message(), "Tag already exists");
    }

    #[test]
    fn test_create_trims_payload() {
        let mutation = TagDraft::new("  Winter ").create(&tags()).unwrap();
        assert_eq!(
            mutation.kind,
            MutationKind::Create {
                payload: json!({"name": "Winter"})
            }
        );
    }

    #[test]
    fn test_list_view_sorts_and_filters_by_name() {
        let mut view = list_view();
        view.replace_snapshot(tags());

        let names: Vec<&str> = view.rows().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Summer Sale"]);
        assert_eq!(view.filter_options(), vec!["All", "Summer Sale", "New"]);

        view.set_filter("New");
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        assert_eq!(delete(RecordId::from("t1")).confirmation(), Some(DELETE_PROMPT));
    }
}
