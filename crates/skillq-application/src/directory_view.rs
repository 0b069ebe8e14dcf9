//! Directory view controller.
//!
//! Owns the displayed programmer list, the search keyword, and the refresh
//! signal. Every completed query replaces `programmers` wholesale; a delete
//! never edits the list, it only raises the refresh signal.

use crate::list_presenter::{ListIntent, ListPresenter, ListView};
use crate::write_dispatcher::WriteDispatcher;
use skillq_core::Result;
use skillq_core::config::QueryOrdering;
use skillq_core::notice::UserNotice;
use skillq_core::programmer::{DirectoryClient, Programmer, ProgrammerId};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Displaying,
    Filtering,
    Deleting,
    Reloading,
}

/// In-memory view state for one mounted directory view.
#[derive(Debug, Clone)]
pub struct DirectoryViewState {
    pub programmers: Vec<Programmer>,
    pub search_skill: String,
    pub refresh_signal: bool,
    pub phase: ViewPhase,
    /// Generation of the query whose result is displayed.
    applied_generation: u64,
}

impl Default for DirectoryViewState {
    fn default() -> Self {
        Self {
            programmers: Vec::new(),
            search_skill: String::new(),
            refresh_signal: false,
            phase: ViewPhase::Loading,
            applied_generation: 0,
        }
    }
}

enum Query {
    ListAll,
    BySkill(String),
}

impl Query {
    fn operation(&self) -> &'static str {
        match self {
            Query::ListAll => "list_all",
            Query::BySkill(_) => "filter_by_skill",
        }
    }
}

pub struct DirectoryViewController {
    state: Arc<RwLock<DirectoryViewState>>,
    client: Arc<dyn DirectoryClient>,
    writes: WriteDispatcher,
    presenter: ListPresenter,
    ordering: QueryOrdering,
    /// Last generation handed out to a query.
    issued: AtomicU64,
    notices: UnboundedSender<UserNotice>,
}

impl DirectoryViewController {
    pub fn new(
        client: Arc<dyn DirectoryClient>,
        writes: WriteDispatcher,
        ordering: QueryOrdering,
        notices: UnboundedSender<UserNotice>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(DirectoryViewState::default())),
            client,
            writes,
            presenter: ListPresenter,
            ordering,
            issued: AtomicU64::new(0),
            notices,
        }
    }

    /// Returns a snapshot of the current view state.
    pub async fn state(&self) -> DirectoryViewState {
        self.state.read().await.clone()
    }

    pub async fn programmers(&self) -> Vec<Programmer> {
        self.state.read().await.programmers.clone()
    }

    pub async fn render(&self) -> ListView {
        let state = self.state.read().await;
        self.presenter.present(&state.programmers)
    }

    /// Initial load when the view mounts.
    pub async fn mount(&self) -> Result<()> {
        self.load().await
    }

    /// Replaces `programmers` with the full directory and lowers the refresh signal.
    ///
    /// On failure the displayed list is kept and the refresh signal stays as it was.
    pub async fn load(&self) -> Result<()> {
        self.run_query(Query::ListAll).await
    }

    /// Runs `load` only if the refresh signal is raised.
    pub async fn reload_if_signaled(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if !state.refresh_signal {
                return Ok(());
            }
            state.phase = ViewPhase::Reloading;
        }
        self.load().await
    }

    pub async fn set_search_skill(&self, skill: impl Into<String>) {
        self.state.write().await.search_skill = skill.into();
    }

    /// Filters by the current keyword and clears the keyword, whatever the outcome.
    pub async fn search(&self) -> Result<()> {
        let skill = self.state.read().await.search_skill.clone();
        let result = self.run_query(Query::BySkill(skill)).await;
        self.state.write().await.search_skill.clear();
        result
    }

    pub async fn handle_intent(&self, intent: ListIntent) -> Result<()> {
        match intent {
            ListIntent::Delete(id) => self.delete(id).await,
        }
    }

    /// Deletes a programmer and requests a reload.
    ///
    /// Under `WritePolicy::FireAndForget` this never fails: the confirmation
    /// is emitted as soon as the delete is dispatched, and the refresh signal
    /// is raised once the delete has finished, whatever its outcome. A failed
    /// reload is logged and leaves the refresh signal raised.
    pub async fn delete(&self, id: ProgrammerId) -> Result<()> {
        self.state.write().await.phase = ViewPhase::Deleting;

        let completion = match self.writes.delete(id.clone()).await {
            Ok(completion) => completion,
            Err(e) => {
                // Only reachable under WritePolicy::Confirmed
                self.state.write().await.phase = ViewPhase::Displaying;
                self.notify(UserNotice::WriteFailed {
                    operation: "delete".to_string(),
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        self.notify(UserNotice::ProgrammerDeleted);
        tracing::info!("[DirectoryView] Delete requested for {}", id);

        // The reload must observe the write, not race it.
        completion.wait().await;
        self.state.write().await.refresh_signal = true;

        if let Err(e) = self.reload_if_signaled().await {
            tracing::warn!("[DirectoryView] Reload after delete failed: {}", e);
        }
        Ok(())
    }

    async fn run_query(&self, query: Query) -> Result<()> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let operation = query.operation();

        {
            let mut state = self.state.write().await;
            let phase = match query {
                Query::ListAll if state.phase == ViewPhase::Reloading => ViewPhase::Reloading,
                Query::ListAll => ViewPhase::Loading,
                Query::BySkill(_) => ViewPhase::Filtering,
            };
            state.phase = phase;
        }

        // The lock is not held across the network call.
        let result = match &query {
            Query::ListAll => self.client.list_all().await,
            Query::BySkill(skill) => self.client.filter_by_skill(skill).await,
        };

        let mut state = self.state.write().await;
        state.phase = ViewPhase::Displaying;

        let programmers = match result {
            Ok(programmers) => programmers,
            Err(e) => {
                tracing::warn!(operation, generation, "[DirectoryView] Query failed: {}", e);
                return Err(e);
            }
        };

        if self.ordering == QueryOrdering::LatestIssuedWins
            && generation < state.applied_generation
        {
            tracing::debug!(
                operation,
                generation,
                applied = state.applied_generation,
                "[DirectoryView] Discarding stale result"
            );
            return Ok(());
        }

        tracing::debug!(
            operation,
            generation,
            count = programmers.len(),
            "[DirectoryView] Replacing list"
        );
        state.programmers = programmers;
        state.applied_generation = generation;
        if matches!(query, Query::ListAll) {
            state.refresh_signal = false;
        }
        Ok(())
    }

    fn notify(&self, notice: UserNotice) {
        if self.notices.send(notice).is_err() {
            tracing::debug!("[DirectoryView] Notice receiver dropped");
        }
    }
}
