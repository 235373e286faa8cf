//! The state container: one store holding the dashboard state.
//!
//! [`AppContext`] is an owned handle; clones share the same store. The
//! [`global`] module offers a single process-wide instance for callers that
//! cannot thread a handle through.

use crate::config::DashboardConfig;
use crate::reducer::{AppEnvironment, AppReducer};
use crate::stats::{get_dashboard_stats, DashboardStats};
use crate::types::{AppAction, AppState};
use clientdesk_core::environment::{Clock, SystemClock};
use clientdesk_runtime::Store;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Store specialised to the dashboard
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Raw input that does not decode to an [`AppAction`]
///
/// Covers unknown `type` tags and malformed payloads alike.
#[derive(Debug, Error)]
#[error("Failed to decode action: {source}")]
pub struct ActionDecodeError {
    #[from]
    source: serde_json::Error,
}

/// Owns the dashboard state and the only way to change it
#[derive(Clone)]
pub struct AppContext {
    store: AppStore,
}

impl AppContext {
    /// Creates a context over `initial_state` using `clock` for payment dates
    #[must_use]
    pub fn new(initial_state: AppState, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Store::new(initial_state, AppReducer::new(), AppEnvironment::new(clock)),
        }
    }

    /// Creates a context over the demo seed with the system clock
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(AppState::seed(), Arc::new(SystemClock))
    }

    /// Creates a context with the configured initial data and the system clock
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.seed.initial_state(), Arc::new(SystemClock))
    }

    /// Applies `action` and publishes the resulting state
    ///
    /// Dispatches are applied one at a time in the order they reach the store.
    /// The new state is visible to readers and subscribers once this returns.
    pub async fn dispatch(&self, action: AppAction) {
        self.store.send(action).await;
    }

    /// Decodes a `{"type", "payload"}` action and dispatches it
    ///
    /// # Errors
    ///
    /// Returns [`ActionDecodeError`] without touching state when `raw` is not
    /// a known action.
    pub async fn dispatch_json(&self, raw: &str) -> Result<(), ActionDecodeError> {
        let action: AppAction = serde_json::from_str(raw).inspect_err(|error| {
            tracing::warn!(%error, "Rejected undecodable action");
        })?;
        self.dispatch(action).await;
        Ok(())
    }

    /// Returns a copy of the current state
    pub async fn get_state(&self) -> AppState {
        self.store.state(Clone::clone).await
    }

    /// Reads the current state through a closure
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&AppState) -> T,
    {
        self.store.state(f).await
    }

    /// Last published state, without waiting on in-flight dispatches
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.store.snapshot()
    }

    /// Receives every published state, starting with the current one
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.store.subscribe()
    }

    /// Dashboard figures for the current state
    pub async fn dashboard_stats(&self) -> DashboardStats {
        self.store.state(get_dashboard_stats).await
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

/// Process-wide context slot
///
/// Install once at startup, then read from anywhere.
///
/// ```no_run
/// use clientdesk_dashboard::{global, AppContext};
///
/// # async fn example() -> Result<(), clientdesk_dashboard::ContextError> {
/// global::install(AppContext::seeded())?;
/// let state = global::app_context()?.get_state().await;
/// # Ok(())
/// # }
/// ```
pub mod global {
    use super::{AppContext, Error};
    use once_cell::sync::OnceCell;

    static CONTEXT: OnceCell<AppContext> = OnceCell::new();

    /// Misuse of the process-wide slot
    #[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
    pub enum ContextError {
        /// Read before [`install`]
        #[error("App context requested before it was installed")]
        NotInitialized,

        /// [`install`] called a second time
        #[error("App context is already installed")]
        AlreadyInitialized,
    }

    /// Installs the process-wide context
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::AlreadyInitialized`] if a context is already
    /// installed; the existing one is kept.
    pub fn install(context: AppContext) -> Result<&'static AppContext, ContextError> {
        CONTEXT
            .set(context)
            .map_err(|_| ContextError::AlreadyInitialized)?;
        tracing::info!("App context installed");
        app_context()
    }

    /// Returns the process-wide context
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NotInitialized`] before [`install`] is called.
    pub fn app_context() -> Result<&'static AppContext, ContextError> {
        CONTEXT.get().ok_or(ContextError::NotInitialized)
    }
}
