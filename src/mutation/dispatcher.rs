//! Runs mutations against a screen and reconciles its snapshot

use crate::client::CollectionSource;
use crate::core::error::AdminError;
use crate::core::notice::Notice;
use crate::core::record::{Record, RecordId};
use crate::mutation::{Confirm, Mutation, MutationKind, MutationOutcome, Reconcile};
use crate::screen::Screen;

/// What the backend gave back for a write
enum Applied<T> {
    Record(T),
    Removed(RecordId),
    /// The write succeeded but the backend did not echo the record
    Unechoed,
}

/// Confirm-then-execute wrapper around a screen's collection source
///
/// No optimistic updates: the snapshot changes only after the backend has
/// accepted the write. A failure pushes an error notice carrying the
/// backend's message and leaves the snapshot exactly as it was.
///
/// An accepted write whose follow-up refetch fails still succeeds, as
/// [`MutationOutcome::Stale`]: the success notice is followed by the
/// refetch error.
pub struct MutationDispatcher<C: Confirm> {
    confirm: C,
}

impl<C: Confirm> MutationDispatcher<C> {
    pub fn new(confirm: C) -> Self {
        Self { confirm }
    }

    /// Run a mutation built from a form, unless building it failed
    ///
    /// A form that failed local validation shows its message and sends
    /// nothing.
    pub async fn submit<T, S>(
        &mut self,
        screen: &mut Screen<T, S>,
        mutation: Result<Mutation, AdminError>,
    ) -> Result<MutationOutcome, AdminError>
    where
        T: Record,
        S: CollectionSource<T>,
    {
        match mutation {
            Ok(mutation) => self.dispatch(screen, mutation).await,
            Err(e) => {
                tracing::debug!("Form rejected before submit: {}", e);
                screen.push_notice(Notice::from(&e));
                Err(e)
            }
        }
    }

    /// Confirm if needed, send the write, then patch or refetch the snapshot
    ///
    /// Fails with [`AdminError::Busy`] unless the screen is ready.
    pub async fn dispatch<T, S>(
        &mut self,
        screen: &mut Screen<T, S>,
        mutation: Mutation,
    ) -> Result<MutationOutcome, AdminError>
    where
        T: Record,
        S: CollectionSource<T>,
    {
        screen.ensure_ready()?;

        if let Some(prompt) = mutation.confirmation() {
            if !self.confirm.confirm(prompt) {
                tracing::debug!("{} mutation cancelled at confirmation", T::resource_name());
                return Ok(MutationOutcome::Cancelled);
            }
        }

        screen.begin_submit()?;

        let applied = match execute(screen.source(), &mutation.kind).await {
            Ok(applied) => applied,
            Err(e) => {
                tracing::warn!("{} mutation failed: {}", T::resource_name(), e);
                screen.push_notice(Notice::from(&e));
                screen.finish_submit();
                return Err(e);
            }
        };

        if let Some(message) = mutation.success_message() {
            screen.push_notice(Notice::success(message));
        }

        let outcome = match reconcile(screen, mutation.reconcile, applied).await {
            Ok(outcome) => outcome,
            Err(e) => {
                // The write is committed; only the list on screen is behind
                tracing::warn!("Refetch after {} mutation failed: {}", T::resource_name(), e);
                screen.push_notice(Notice::from(&e));
                MutationOutcome::Stale
            }
        };
        screen.finish_submit();
        Ok(outcome)
    }
}

async fn execute<T, S>(source: &S, kind: &MutationKind) -> Result<Applied<T>, AdminError>
where
    T: Record,
    S: CollectionSource<T>,
{
    match kind {
        MutationKind::Create { payload } => {
            let echoed = source.create(payload).await?;
            Ok(echoed.map_or(Applied::Unechoed, Applied::Record))
        }
        MutationKind::Update { id, payload } => {
            let echoed = source.update(id, payload).await?;
            Ok(echoed.map_or(Applied::Unechoed, Applied::Record))
        }
        MutationKind::Delete { id } => source.remove(id).await.map(Applied::Removed),
        MutationKind::Action {
            method,
            id,
            verb,
            payload,
        } => {
            let echoed = source.action(*method, id, verb, payload.as_ref()).await?;
            Ok(echoed.map_or(Applied::Unechoed, Applied::Record))
        }
    }
}

async fn reconcile<T, S>(
    screen: &mut Screen<T, S>,
    policy: Reconcile,
    applied: Applied<T>,
) -> Result<MutationOutcome, AdminError>
where
    T: Record,
    S: CollectionSource<T>,
{
    match (policy, applied) {
        (Reconcile::Patch, Applied::Record(record)) => {
            let id = record.id();
            screen.view_mut().upsert(record);
            Ok(MutationOutcome::Patched(id))
        }
        (Reconcile::Patch, Applied::Removed(id)) => {
            screen.view_mut().remove(&id);
            Ok(MutationOutcome::Removed(id))
        }
        _ => {
            screen.refetch().await?;
            Ok(MutationOutcome::Refetched)
        }
    }
}
