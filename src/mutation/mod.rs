//! Mutations against a screen's collection
//!
//! A [`Mutation`] describes one write: what to send, whether the user has to
//! confirm it first, how the snapshot is reconciled afterwards, and which
//! success notice to show. The [`MutationDispatcher`] runs it against a
//! [`Screen`](crate::screen::Screen).

pub mod confirm;
pub mod dispatcher;

pub use confirm::{AutoConfirm, Confirm, DenyAll};
pub use dispatcher::MutationDispatcher;

use crate::client::ActionMethod;
use crate::core::record::RecordId;
use serde_json::Value;

pub const DEFAULT_DELETE_PROMPT: &str = "Are you sure you want to delete this item?";

/// How the snapshot catches up after a successful write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconcile {
    /// Replace (or drop) the changed record in place
    #[default]
    Patch,
    /// Fetch the whole collection again
    Refetch,
}

/// The write itself
#[derive(Debug, Clone, PartialEq)]
pub enum MutationKind {
    Create {
        payload: Value,
    },
    Update {
        id: RecordId,
        payload: Value,
    },
    Delete {
        id: RecordId,
    },
    /// A sub-route such as `PATCH /{id}/toggle-status`
    Action {
        method: ActionMethod,
        id: RecordId,
        verb: String,
        payload: Option<Value>,
    },
}

/// Result of a dispatched mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The changed record was replaced or appended in the snapshot
    Patched(RecordId),
    /// The record was dropped from the snapshot
    Removed(RecordId),
    /// The snapshot was fetched again
    Refetched,
    /// The write went through but the refetch after it failed; the
    /// snapshot is the one from before the write
    Stale,
    /// The user declined the confirmation; nothing was sent
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub kind: MutationKind,
    pub reconcile: Reconcile,
    confirmation: Option<String>,
    success_message: Option<String>,
}

impl Mutation {
    fn new(kind: MutationKind) -> Self {
        Self {
            kind,
            reconcile: Reconcile::Patch,
            confirmation: None,
            success_message: None,
        }
    }

    pub fn create(payload: Value) -> Self {
        Self::new(MutationKind::Create { payload })
    }

    pub fn update(id: RecordId, payload: Value) -> Self {
        Self::new(MutationKind::Update { id, payload })
    }

    /// Deletion always asks for confirmation first
    pub fn delete(id: RecordId) -> Self {
        Self {
            confirmation: Some(DEFAULT_DELETE_PROMPT.to_string()),
            ..Self::new(MutationKind::Delete { id })
        }
    }

    pub fn action(
        method: ActionMethod,
        id: RecordId,
        verb: impl Into<String>,
        payload: Option<Value>,
    ) -> Self {
        Self::new(MutationKind::Action {
            method,
            id,
            verb: verb.into(),
            payload,
        })
    }

    /// `PATCH /{id}/toggle-status`
    pub fn toggle(id: RecordId) -> Self {
        Self::action(ActionMethod::Patch, id, "toggle-status", None)
    }

    pub fn with_reconcile(mut self, reconcile: Reconcile) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Require confirmation with this prompt
    pub fn confirm_with(mut self, prompt: impl Into<String>) -> Self {
        self.confirmation = Some(prompt.into());
        self
    }

    /// Show this notice when the write succeeds
    pub fn with_success(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Prompt to confirm before sending, if any
    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self.kind, MutationKind::Delete { .. })
    }
}
