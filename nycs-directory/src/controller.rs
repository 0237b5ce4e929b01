//! One-time directory initialization
//!
//! **State machine:** `Uninitialized → Initializing → Initialized(outcome)`
//!
//! The first `initialize()` call launches the fetch sequence on a spawned
//! task; concurrent callers join it through a watch channel. The outcome,
//! success or failure, is memoized for the lifetime of the controller and is
//! never retried. A caller that wants to retry after a failure creates a new
//! controller.
//!
//! If the fetch task is dropped before finishing (panic, runtime shutdown),
//! an aborted failure is recorded in its place, so no caller waits forever.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nycs_common::config::{HttpConfig, SourceUrls};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::builder::DirectoryBuilder;
use crate::error::{FetchError, InitError, SourceKind};
use crate::fetcher::{HttpJsonFetcher, JsonFetcher, USER_AGENT};
use crate::models::Directory;

/// Memoized initialization result
pub type InitOutcome = Result<Arc<Directory>, InitError>;

/// Externally visible initialization progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

enum State {
    Uninitialized,
    Initializing,
    Initialized(InitOutcome),
}

struct Inner {
    fetcher: Arc<dyn JsonFetcher>,
    urls: SourceUrls,
    state: Mutex<State>,
    outcome_tx: watch::Sender<Option<InitOutcome>>,
}

/// Fetches both datasets once and hands out the merged directory
///
/// Clones share the same initialization state.
#[derive(Clone)]
pub struct DirectoryController {
    inner: Arc<Inner>,
}

impl DirectoryController {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, urls: SourceUrls) -> Self {
        let (outcome_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                fetcher,
                urls,
                state: Mutex::new(State::Uninitialized),
                outcome_tx,
            }),
        }
    }

    /// Controller backed by [`HttpJsonFetcher`]
    pub fn from_http_config(urls: SourceUrls, http: &HttpConfig) -> Result<Self, FetchError> {
        let user_agent = http.user_agent.as_deref().unwrap_or(USER_AGENT);
        let fetcher = HttpJsonFetcher::with_user_agent(user_agent)?;
        Ok(Self::new(Arc::new(fetcher), urls))
    }

    pub fn urls(&self) -> &SourceUrls {
        &self.inner.urls
    }

    /// Return the merged directory, fetching it on the first call only
    ///
    /// Must be called from within a tokio runtime; outside one it fails
    /// without touching the state.
    pub async fn initialize(&self) -> InitOutcome {
        let handle = Handle::try_current().map_err(|e| {
            InitError::aborted(SourceKind::Controller, format!("no tokio runtime: {}", e))
        })?;

        let launch = {
            let mut state = self.inner.lock_state();
            let launch = match &*state {
                State::Initialized(outcome) => return outcome.clone(),
                State::Initializing => false,
                State::Uninitialized => true,
            };
            if launch {
                *state = State::Initializing;
            }
            launch
        };

        // Outside the lock: a task rejected by a closing runtime records
        // its outcome from the guard's drop.
        if launch {
            self.spawn_fetch_sequence(&handle);
        }

        self.wait_for_outcome().await
    }

    /// Current progress, without triggering a fetch
    pub fn state(&self) -> ControllerState {
        match &*self.inner.lock_state() {
            State::Uninitialized => ControllerState::Uninitialized,
            State::Initializing => ControllerState::Initializing,
            State::Initialized(Ok(_)) => ControllerState::Ready,
            State::Initialized(Err(_)) => ControllerState::Failed,
        }
    }

    /// The memoized directory, if initialization already succeeded
    pub fn directory(&self) -> Option<Arc<Directory>> {
        match &*self.inner.lock_state() {
            State::Initialized(Ok(directory)) => Some(Arc::clone(directory)),
            _ => None,
        }
    }

    /// Receiver that observers on any task can await for the outcome
    ///
    /// The value stays `None` until the fetch sequence finishes.
    pub fn subscribe(&self) -> watch::Receiver<Option<InitOutcome>> {
        self.inner.outcome_tx.subscribe()
    }

    fn spawn_fetch_sequence(&self, handle: &Handle) {
        let guard = FetchGuard {
            inner: Arc::clone(&self.inner),
            step: SourceKind::Controller,
            recorded: false,
        };

        handle.spawn(async move {
            let mut guard = guard;
            let outcome = guard.inner.load(&mut guard.step).await;
            guard.complete(outcome);
        });
    }

    async fn wait_for_outcome(&self) -> InitOutcome {
        let mut rx = self.inner.outcome_tx.subscribe();
        let outcome = match rx.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).clone(),
            Err(_) => None,
        };
        outcome.unwrap_or_else(|| {
            Err(InitError::aborted(
                SourceKind::Controller,
                "initialization finished without an outcome",
            ))
        })
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Directory fetch, then SAT fetch; never concurrently
    ///
    /// `step` tracks the source being worked on for abort reporting.
    async fn load(&self, step: &mut SourceKind) -> InitOutcome {
        *step = SourceKind::Directory;
        info!(url = %self.urls.directory_url, "Fetching school directory");
        let directory_records = self
            .fetcher
            .fetch(&self.urls.directory_url)
            .await
            .map_err(|e| InitError::from_fetch(SourceKind::Directory, &e))?;

        let mut builder = DirectoryBuilder::new();
        builder.apply_directory_records(&directory_records);
        drop(directory_records);

        *step = SourceKind::Sat;
        info!(url = %self.urls.sat_url, "Fetching SAT results");
        let sat_records = self
            .fetcher
            .fetch(&self.urls.sat_url)
            .await
            .map_err(|e| InitError::from_fetch(SourceKind::Sat, &e))?;

        builder.apply_sat_records(&sat_records);

        Ok(Arc::new(builder.finish()))
    }

    /// State first, then notify, so late callers never wait on a finished sequence
    fn record(&self, outcome: InitOutcome) {
        match &outcome {
            Ok(directory) => info!(schools = directory.len(), "School directory ready"),
            Err(e) => warn!("School directory initialization failed: {}", e),
        }

        *self.lock_state() = State::Initialized(outcome.clone());
        self.outcome_tx.send_replace(Some(outcome));
    }
}

/// Owned by the fetch task; records an aborted outcome if dropped unfinished
struct FetchGuard {
    inner: Arc<Inner>,
    step: SourceKind,
    recorded: bool,
}

impl FetchGuard {
    fn complete(mut self, outcome: InitOutcome) {
        self.recorded = true;
        self.inner.record(outcome);
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        if !self.recorded {
            self.inner.record(Err(InitError::aborted(
                self.step,
                "fetch sequence dropped before finishing",
            )));
        }
    }
}
