//! Per-screen state machine
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Ready ──mutation──▶ Submitting ──▶ Ready
//!                   │                                   (snapshot updated,
//!                   └──err──▶ Error ──load──▶ Loading     or notice shown)
//! ```
//!
//! No state is terminal: a screen can always fetch again.

use crate::client::CollectionSource;
use crate::core::error::AdminError;
use crate::core::notice::{Notice, Notices};
use crate::core::record::Record;
use crate::view::ListView;
use std::marker::PhantomData;

/// Lifecycle state of one screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    Loading,
    Ready,
    /// The last list fetch failed; carries the message shown inline
    Error(String),
    Submitting,
}

impl ScreenState {
    pub fn name(&self) -> &'static str {
        match self {
            ScreenState::Idle => "idle",
            ScreenState::Loading => "loading",
            ScreenState::Ready => "ready",
            ScreenState::Error(_) => "error",
            ScreenState::Submitting => "submitting",
        }
    }
}

/// Handle for one list fetch; only the most recent ticket may apply its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What happened to a finished list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// Superseded by a later fetch, or the screen was unmounted
    Discarded,
}

/// One admin screen: a collection source, its list view, and notices
///
/// A screen owns its snapshot exclusively. Fetches may overlap (for example
/// when a caller spawns them on a cloned source), but only the response to
/// the latest [`LoadTicket`] is applied; an earlier one arriving late is
/// dropped, as is anything that lands after [`Screen::unmount`].
pub struct Screen<T: Record, S: CollectionSource<T>> {
    source: S,
    view: ListView<T>,
    state: ScreenState,
    notices: Notices,
    latest_ticket: u64,
    mounted: bool,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record, S: CollectionSource<T>> Screen<T, S> {
    pub fn new(source: S, view: ListView<T>) -> Self {
        Self {
            source,
            view,
            state: ScreenState::Idle,
            notices: Notices::default(),
            latest_ticket: 0,
            mounted: true,
            _record: PhantomData,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ScreenState::Loading
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> &ListView<T> {
        &self.view
    }

    /// Mutable access for search, filter and sort inputs
    pub fn view_mut(&mut self) -> &mut ListView<T> {
        &mut self.view
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Start a list fetch; any earlier outstanding ticket becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.state = ScreenState::Loading;
        tracing::debug!(ticket = self.latest_ticket, "Loading {}", T::resource_name());
        LoadTicket(self.latest_ticket)
    }

    /// Apply the result of the fetch started with `ticket`
    ///
    /// A failed fetch keeps the previous snapshot and moves to
    /// [`ScreenState::Error`] with the user-facing message.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<T>, AdminError>,
    ) -> LoadOutcome {
        if !self.mounted {
            tracing::warn!(ticket = ticket.0, "Discarding {} response after unmount", T::resource_name());
            return LoadOutcome::Discarded;
        }
        if ticket.0 != self.latest_ticket {
            tracing::warn!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "Discarding stale {} response",
                T::resource_name()
            );
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Loaded {}", T::resource_name());
                self.view.replace_snapshot(records);
                self.state = ScreenState::Ready;
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", T::resource_name(), e);
                let notice = Notice::from(&e);
                self.state = ScreenState::Error(notice.message.clone());
                self.notices.push(notice);
            }
        }
        LoadOutcome::Applied
    }

    /// Fetch the collection and apply it
    ///
    /// Also the retry path from [`ScreenState::Error`].
    pub async fn load(&mut self) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = self.source.list().await;
        self.finish_load(ticket, result)
    }

    /// Stop applying responses; the screen is gone
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub(crate) fn begin_submit(&mut self) -> Result<(), AdminError> {
        self.ensure_ready()?;
        self.state = ScreenState::Submitting;
        Ok(())
    }

    pub(crate) fn ensure_ready(&self) -> Result<(), AdminError> {
        match self.state {
            ScreenState::Ready => Ok(()),
            ref other => Err(AdminError::Busy {
                state: other.name(),
            }),
        }
    }

    pub(crate) fn finish_submit(&mut self) {
        self.state = ScreenState::Ready;
    }

    /// Replace the snapshot after a mutation; supersedes in-flight fetches
    pub(crate) async fn refetch(&mut self) -> Result<(), AdminError> {
        self.latest_ticket += 1;
        let records = self.source.list().await?;
        self.view.replace_snapshot(records);
        Ok(())
    }
}
