//! Contact queries submitted through the storefront (`/api/queries`)

use crate::client::ActionMethod;
use crate::core::error::AdminError;
use crate::core::record::RecordId;
use crate::mutation::Mutation;
use crate::view::ListView;
use serde_json::json;

crate::impl_record!(
    /// A customer enquiry from the contact form
    Inquiry,
    "queries",
    ["name", "email", "message"],
    {
        name: String,
        email: String,
        phone_number: String,
        organisation_name: String,
        query_type: String,
        message: String,
        status: String,
    }
);

/// Workflow states an enquiry moves through
pub const STATUSES: &[&str] = &["New", "Contacted", "In Progress", "Resolved", "Closed"];

pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this query? This action cannot be undone.";

/// The queries screen: search name, email or message; filter by status
pub fn list_view() -> ListView<Inquiry> {
    ListView::new().with_filter_field("status")
}

/// `PATCH /{id}/status`, patched in place from the echoed record
pub fn set_status(id: RecordId, status: &str) -> Result<Mutation, AdminError> {
    if !STATUSES.contains(&status) {
        return Err(AdminError::field(
            "status",
            format!("Unknown query status '{}'", status),
        ));
    }
    Ok(Mutation::action(
        ActionMethod::Patch,
        id,
        "status",
        Some(json!({ "status": status })),
    )
    .with_success("Status updated successfully"))
}

pub fn delete(id: RecordId) -> Mutation {
    Mutation::delete(id)
        .confirm_with(DELETE_PROMPT)
        .with_success("Query deleted successfully")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::MutationKind;

    #[test]
    fn test_set_status_payload() {
        let mutation = set_status(RecordId::from("q1"), "Resolved").unwrap();
        assert_eq!(
            mutation.kind,
            MutationKind::Action {
                method: ActionMethod::Patch,
                id: RecordId::from("q1"),
                verb: "status".to_string(),
                payload: Some(json!({"status": "Resolved"})),
            }
        );
        assert_eq!(mutation.success_message(), Some("Status updated successfully"));
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(set_status(RecordId::from("q1"), "Escalated").is_err());
    }

    #[test]
    fn test_search_covers_message_body() {
        let queries: Vec<Inquiry> = serde_json::from_value(json!([
            {"_id": "q1", "name": "Neha", "email": "neha@corp.in", "message": "Bulk order pricing?",
             "status": "New", "queryType": "Sales"},
            {"_id": "q2", "name": "Kabir", "message": "Return not picked up", "status": "Resolved"},
        ]))
        .unwrap();

        let mut view = list_view();
        view.replace_snapshot(queries);
        view.set_search("bulk");
        let ids: Vec<RecordId> = view.rows().map(|q| q.id.clone()).collect();
        assert_eq!(ids, vec![RecordId::from("q1")]);

        view.set_search("");
        view.set_filter("Resolved");
        assert_eq!(view.len(), 1);
    }
}
