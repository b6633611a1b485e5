//! Serper search page state.
//!
//! Holds the result of the latest Serper search and keeps a copy in a local
//! JSON file so it survives a restart. A failed search clears the shown
//! result but leaves the saved copy alone; only [`SerperPage::clear`]
//! deletes it.

use std::path::{Path, PathBuf};

use placehub_types::{SerperResult, SerperSearchMode, SerperSearchParams};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::persist::{self, PersistError};
use crate::view::Phase;

/// File name used when the caller does not pick one.
pub const DEFAULT_SERPER_RESULTS_FILE: &str = "serper-search-results.json";

/// State of the Serper search page.
#[derive(Debug, Clone)]
pub struct SerperPage {
    path: PathBuf,
    result: Option<SerperResult>,
    phase: Phase,
}

impl SerperPage {
    /// Open the page, restoring the result saved at `path` if any.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let result: Option<SerperResult> = persist::load_json(&path);
        debug!(path = %path.display(), restored = result.is_some(), "serper page opened");
        Self {
            path,
            result,
            phase: Phase::Idle,
        }
    }

    /// File the latest result is saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Result on screen.
    pub const fn result(&self) -> Option<&SerperResult> {
        self.result.as_ref()
    }

    /// Current phase.
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether a search is in flight.
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Message of the latest failure.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Mark a search as started, clearing any previous error.
    pub fn begin_request(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Apply the outcome of a search. A successful result is saved; a
    /// failure to save is logged and does not fail the search.
    pub fn finish_search(&mut self, outcome: Result<SerperResult, ClientError>) {
        match outcome {
            Ok(result) => {
                if let Err(e) = persist::save_json(&self.path, &result) {
                    warn!(path = %self.path.display(), error = %e, "failed to save serper result");
                }
                self.result = Some(result);
                self.phase = Phase::Idle;
            }
            Err(e) => {
                self.result = None;
                self.phase = Phase::failed(&e, "Search failed");
            }
        }
    }

    /// Run a Serper search through `api` and apply its outcome.
    pub async fn search(&mut self, api: &ApiClient, mode: SerperSearchMode, params: &SerperSearchParams) {
        self.begin_request();
        let outcome = api.serper_search(mode, params).await;
        self.finish_search(outcome);
    }

    /// Drop the shown result and its saved copy.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the saved copy cannot be deleted; the
    /// shown result is kept in that case.
    pub fn clear(&mut self) -> Result<(), PersistError> {
        persist::remove(&self.path)?;
        self.result = None;
        Ok(())
    }
}
