//! # clientdesk Runtime
//!
//! Runtime implementation for the clientdesk reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution,
//! effect handling and state publication.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and serializes every action through the reducer
//! - **Effect Executor**: Executes the effect descriptions a reducer returns, before `send` returns
//! - **Snapshots**: Every committed state is published to subscribers over a watch channel
//!
//! ## Example
//!
//! ```ignore
//! use clientdesk_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use clientdesk_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Metric names and descriptions recorded by the Store
pub mod metrics;

/// Store module - The runtime for reducers
pub mod store {
    use super::{metrics as names, watch, Arc, Effect, Reducer, RwLock};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the reducer is the only writer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution
    /// 5. Snapshot publication to subscribers
    ///
    /// Actions are applied one at a time in the order their `send` acquires
    /// the write lock. Each committed state is published before the lock is
    /// released, so subscribers observe snapshots in the same order.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        snapshots: Arc<watch::Sender<S>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + std::fmt::Debug + 'static,
        S: Clone + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The initial state is published immediately, so a subscriber
        /// created right after construction already sees it.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (snapshots, _) = watch::channel(initial_state.clone());

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                snapshots: Arc::new(snapshots),
            }
        }

        /// Send an action to the store
        ///
        /// This method:
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Publishes the resulting state to subscribers
        /// 4. Releases the lock
        /// 5. Executes the returned effects
        ///
        /// When this returns, the action and all of its effects are complete.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates to the caller.
        /// Reducers should be pure functions that do not panic.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) {
            tracing::debug!(?action, "Processing action");
            metrics::counter!(names::COMMANDS_TOTAL).increment(1);

            let effects = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!(names::REDUCER_DURATION_SECONDS)
                    .record(start.elapsed().as_secs_f64());

                self.snapshots.send_replace((*state).clone());

                // Note: Precision loss acceptable for metrics (effect counts < 2^52)
                #[allow(clippy::cast_precision_loss)]
                metrics::histogram!(names::EFFECTS_COUNT).record(effects.len() as f64);
                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                effects
            };

            for effect in effects {
                Self::execute_effect(effect);
            }
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let client_count = store.state(|s| s.clients.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Clone the most recently published state
        ///
        /// Does not wait on the state lock.
        #[must_use]
        pub fn snapshot(&self) -> S {
            self.snapshots.borrow().clone()
        }

        /// Subscribe to state snapshots
        ///
        /// The receiver starts at the current snapshot and is notified after
        /// every action the store processes. Intermediate snapshots may be
        /// skipped by a slow reader; the latest one is always visible.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<S> {
            self.snapshots.subscribe()
        }

        /// Execute a single effect
        fn execute_effect(effect: Effect) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    metrics::counter!(names::EFFECTS_EXECUTED, "type" => "none").increment(1);
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    metrics::counter!(names::EFFECTS_EXECUTED, "type" => "parallel").increment(1);

                    for effect in effects {
                        Self::execute_effect(effect);
                    }
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                snapshots: Arc::clone(&self.snapshots),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
