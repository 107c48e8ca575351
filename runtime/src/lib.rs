//! # Retro Runtime
//!
//! Runtime implementation for the retro todo reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state and runs the reducer for every action
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to the reducer
//! - **Observers**: Callbacks invoked after every state transition (re-rendering)
//!
//! The Store is single-threaded by construction: `send` takes `&mut self`
//! and runs every action, and every action produced by its effects, to
//! completion before returning.
//!
//! ## Example
//!
//! ```ignore
//! use retro_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Re-render after every transition
//! store.subscribe(|_action, state| render(state));
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use retro_core::{action::Action, effect::Effect, reducer::Reducer};
use std::collections::VecDeque;
use std::time::Instant;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// A single `send()` produced more actions than the configured limit
        ///
        /// This almost always means two actions keep dispatching each other.
        /// Actions processed before the limit was hit stay applied.
        #[error("Dispatch limit of {limit} actions exceeded in a single send")]
        DispatchLimitExceeded {
            /// Configured maximum
            limit: usize,
        },
    }
}

pub use error::StoreError;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of actions one `send()` may process, including the
    /// initial action and everything dispatched by effects
    pub max_dispatch_depth: usize,
}

impl StoreConfig {
    /// Default dispatch limit
    pub const DEFAULT_MAX_DISPATCH_DEPTH: usize = 64;

    /// Set the dispatch limit
    #[must_use]
    pub const fn with_max_dispatch_depth(mut self, max_dispatch_depth: usize) -> Self {
        self.max_dispatch_depth = max_dispatch_depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_dispatch_depth: Self::DEFAULT_MAX_DISPATCH_DEPTH,
        }
    }
}

/// Summary of one `send()` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendReport {
    /// Actions run through the reducer (the sent one plus fed-back ones)
    pub actions_processed: usize,
    /// Effects returned by the reducer and executed
    pub effects_executed: usize,
}

/// Callback invoked after every processed action with the action name and new state
type Observer<S> = Box<dyn FnMut(&'static str, &S)>;

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (exclusively owned)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
/// 5. Observers notified after each state transition
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
    state: S,
    reducer: R,
    environment: E,
    config: StoreConfig,
    observers: Vec<Observer<S>>,
    shutdown: bool,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    A: Action,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// Uses [`StoreConfig::default`].
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a new Store with custom configuration
    #[must_use]
    pub const fn with_config(
        initial_state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
    ) -> Self {
        Self {
            state: initial_state,
            reducer,
            environment,
            config,
            observers: Vec::new(),
            shutdown: false,
        }
    }

    /// Register an observer called after every processed action
    ///
    /// Observers run in registration order, after the reducer and before
    /// the action's effects are executed.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&'static str, &S) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Send an action to the store
    ///
    /// 1. Calls reducer with (state, action, environment)
    /// 2. Notifies observers
    /// 3. Executes returned effects, queueing dispatched actions
    /// 4. Repeats for queued actions until the queue is empty
    ///
    /// # Errors
    ///
    /// - [`StoreError::ShutdownInProgress`] if the store is shutting down.
    /// - [`StoreError::DispatchLimitExceeded`] if effects keep dispatching
    ///   past [`StoreConfig::max_dispatch_depth`].
    ///
    /// # Panics
    ///
    /// If the reducer panics, the panic propagates.
    /// Reducers should be pure functions that do not panic.
    #[tracing::instrument(skip_all, name = "store_send", fields(action = action.name()))]
    pub fn send(&mut self, action: A) -> Result<SendReport, StoreError> {
        if self.shutdown {
            tracing::warn!("Rejected action: store is shutting down");
            metrics::counter!("store.shutdown.rejected_actions").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }

        let mut queue = VecDeque::from([action]);
        let mut report = SendReport::default();

        while let Some(action) = queue.pop_front() {
            if report.actions_processed >= self.config.max_dispatch_depth {
                tracing::error!(
                    limit = self.config.max_dispatch_depth,
                    pending = queue.len() + 1,
                    "Dispatch limit exceeded, dropping remaining actions"
                );
                metrics::counter!("store.dispatch.limit_exceeded").increment(1);
                return Err(StoreError::DispatchLimitExceeded {
                    limit: self.config.max_dispatch_depth,
                });
            }

            let effects = self.reduce(action);
            report.actions_processed += 1;

            tracing::trace!("Executing {} effects", effects.len());
            for effect in effects {
                Self::execute_effect(effect, &mut queue);
                report.effects_executed += 1;
            }
        }

        tracing::debug!(
            actions = report.actions_processed,
            effects = report.effects_executed,
            "Action processing completed"
        );
        Ok(report)
    }

    /// Run the reducer for one action and notify observers
    fn reduce(&mut self, action: A) -> retro_core::SmallVec<[Effect<A>; 4]> {
        let name = action.name();
        let kind = if action.is_command() {
            "command"
        } else if action.is_event() {
            "event"
        } else {
            "other"
        };
        metrics::counter!("store.actions.total", "kind" => kind).increment(1);

        let span = tracing::debug_span!("reducer_execution", action = name);
        let _enter = span.enter();

        let start = Instant::now();
        let effects = self
            .reducer
            .reduce(&mut self.state, action, &self.environment);
        metrics::histogram!("store.reducer.duration_seconds")
            .record(start.elapsed().as_secs_f64());

        tracing::trace!("Reducer completed, returned {} effects", effects.len());

        for observer in &mut self.observers {
            observer(name, &self.state);
        }

        effects
    }

    /// Execute one effect
    ///
    /// # Effect Types
    ///
    /// - `None`: No-op
    /// - `Dispatch`: Queues the action behind everything already queued
    fn execute_effect(effect: Effect<A>, queue: &mut VecDeque<A>) {
        metrics::counter!("store.effects.executed", "type" => effect.kind()).increment(1);
        match effect {
            Effect::None => {
                tracing::trace!("Executing Effect::None (no-op)");
            },
            Effect::Dispatch(action) => {
                tracing::trace!(action = action.name(), "Queueing dispatched action");
                queue.push_back(*action);
            },
        }
    }

    /// Read current state via a closure
    ///
    /// ```ignore
    /// let todo_count = store.state(|s| s.todos.len());
    /// ```
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        f(&self.state)
    }

    /// Access the injected environment
    pub const fn environment(&self) -> &E {
        &self.environment
    }

    /// Stop accepting new actions
    ///
    /// Every later `send()` returns [`StoreError::ShutdownInProgress`].
    /// State stays readable.
    pub fn shutdown(&mut self) {
        if !self.shutdown {
            tracing::info!("Store shut down");
            metrics::counter!("store.shutdown.initiated").increment(1);
        }
        self.shutdown = true;
    }

    /// Returns true once [`Store::shutdown`] has been called
    pub const fn is_shut_down(&self) -> bool {
        self.shutdown
    }

    /// Consume the store and return the final state
    pub fn into_state(self) -> S {
        self.state
    }
}
