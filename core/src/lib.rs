//! # Retro Core
//!
//! Core traits and types for the retro todo reducer architecture.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature, owned data with no lifetimes
//! - **Action**: All possible inputs to a reducer (UI commands and applied events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use retro_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let effects = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! assert!(effects.is_empty());
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};
pub use uuid::Uuid;

/// Action module - Unified input type for reducers
///
/// Actions represent all possible state transitions in the system.
/// They unify commands (requests coming from the user interface) and
/// events (facts about what happened to the state).
pub mod action {
    /// Common behavior of action enums
    ///
    /// Usually implemented through `#[derive(Action)]` from `retro-macros`,
    /// which reads the `#[command]` and `#[event]` variant markers.
    pub trait Action {
        /// Variant name, used for tracing and metrics labels
        fn name(&self) -> &'static str;

        /// Returns true if this action is a command
        fn is_command(&self) -> bool;

        /// Returns true if this action is an event
        fn is_event(&self) -> bool;
    }
}

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
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime, most reducers return none
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe work to be performed by the runtime after a reducer
/// returns. They are values, not execution. The runtime executes them on
/// the same thread, in order.
pub mod effect {
    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer once the current one completes
        Dispatch(Box<Action>),
    }

    impl<Action> Effect<Action> {
        /// Dispatch a follow-up action
        #[must_use]
        pub fn dispatch(action: Action) -> Self {
            Self::Dispatch(Box::new(action))
        }

        /// Returns true for `Effect::None`
        #[must_use]
        pub const fn is_noop(&self) -> bool {
            matches!(self, Self::None)
        }

        /// Label used for metrics and tracing
        #[must_use]
        pub const fn kind(&self) -> &'static str {
            match self {
                Self::None => "none",
                Self::Dispatch(_) => "dispatch",
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of non-determinism (time, identifiers) are abstracted behind
/// traits and injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use retro_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let earlier = clock.now();
    /// assert!(clock.now() >= earlier);
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

    /// Identifier source for newly created entities
    ///
    /// Implementations must never hand out the same identifier twice within
    /// one session. Takes `&self` so it can live inside a shared environment.
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier
        fn next_id(&self) -> Uuid;
    }

    /// Random v4 UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct RandomIdGenerator;

    impl IdGenerator for RandomIdGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{IdGenerator, RandomIdGenerator};
    use std::collections::HashSet;

    #[test]
    fn effect_noop_detection() {
        assert!(Effect::<u8>::None.is_noop());
        assert!(!Effect::dispatch(1_u8).is_noop());
    }

    #[test]
    fn effect_kind_labels() {
        assert_eq!(Effect::<u8>::None.kind(), "none");
        assert_eq!(Effect::dispatch(7_u8).kind(), "dispatch");
    }

    #[test]
    fn random_ids_do_not_repeat() {
        let ids = RandomIdGenerator;
        let seen: HashSet<_> = (0..1_000).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 1_000);
    }
}
