//! # clientdesk Core
//!
//! Core traits and types for the clientdesk reducer architecture.
//!
//! This crate provides the abstractions every feature is built on: a pure
//! reducer that owns all business logic, effect descriptions the runtime
//! executes, and an injected environment for anything non-deterministic.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Example
//!
//! ```ignore
//! use clientdesk_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct LedgerState {
//!     entries: Vec<i64>,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum LedgerAction {
//!     Record { cents: i64 },
//! }
//!
//! impl Reducer for LedgerReducer {
//!     type State = LedgerState;
//!     type Action = LedgerAction;
//!     type Environment = LedgerEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut LedgerState,
//!         action: LedgerAction,
//!         env: &LedgerEnvironment,
//!     ) -> SmallVec<[Effect; 4]> {
//!         match action {
//!             LedgerAction::Record { cents } => state.entries.push(cents),
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// Given the same state, action and environment it must always
        /// produce the same resulting state.
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime. Most reducers return
        /// four or fewer, so they are stored inline.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe work the runtime performs after a reducer returns.
/// Every effect is executed synchronously inside `Store::send`; nothing is
/// left running in the background once `send` returns.
pub mod effect {
    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect {
        /// No-op effect
        None,

        /// Several effects executed together
        Parallel(Vec<Effect>),
    }

    impl Effect {
        /// Combine effects into one
        #[must_use]
        pub const fn merge(effects: Vec<Effect>) -> Effect {
            Effect::Parallel(effects)
        }

        /// Returns true if this effect does nothing when executed
        ///
        /// An empty `Parallel` is also a no-op.
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) => effects.iter().all(Effect::is_none),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All non-deterministic inputs (currently only time) are abstracted behind
/// traits and injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use clientdesk_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let before = clock.now();
    /// assert!(clock.now() >= before);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
