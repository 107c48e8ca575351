//! Reducer logic for the todo list.
//!
//! Commands are checked against the current state and turned into events;
//! events are applied to state. Rejected commands are silent no-ops.

use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use retro_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator},
    reducer::Reducer,
    smallvec,
};
use std::sync::Arc;

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of fresh todo identifiers
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Appends the current input as a new todo and clears the input
    fn add_from_input(state: &mut TodoState, env: &TodoEnvironment) {
        if state.input_is_blank() {
            tracing::debug!(
                input_len = state.input_text.len(),
                "Ignoring add: input is blank"
            );
            return;
        }

        let Some(id) = Self::fresh_id(state, env) else {
            tracing::warn!("Ignoring add: id generator keeps returning ids in use");
            return;
        };

        let event = TodoAction::TodoAdded {
            id,
            text: state.input_text.clone(),
            created_at: env.clock.now(),
        };

        if Self::apply_event(state, &event) {
            state.input_text.clear();
        }
    }

    /// First generated id not yet in the list
    ///
    /// Replayed `TodoAdded` events may already hold ids the generator has
    /// not handed out yet. A generator never repeats itself, so at most
    /// `count` draws can collide.
    fn fresh_id(state: &TodoState, env: &TodoEnvironment) -> Option<TodoId> {
        (0..=state.count())
            .map(|_| TodoId::from_uuid(env.ids.next_id()))
            .find(|id| !state.exists(id))
    }

    /// Applies an event to state, returning whether anything changed
    fn apply_event(state: &mut TodoState, action: &TodoAction) -> bool {
        match action {
            TodoAction::TodoAdded {
                id,
                text,
                created_at,
            } => {
                if state.exists(id) {
                    tracing::warn!(%id, "Ignoring TodoAdded: id already in use");
                    return false;
                }
                if text.trim().is_empty() {
                    tracing::warn!(%id, "Ignoring TodoAdded: text is blank");
                    return false;
                }
                state
                    .todos
                    .push(TodoItem::new(*id, text.clone(), *created_at));
                tracing::debug!(%id, count = state.count(), "Todo added");
                true
            },
            TodoAction::TodoToggled { id } => {
                let Some(todo) = state.todos.iter_mut().find(|t| t.id == *id) else {
                    tracing::debug!(%id, "Ignoring toggle: todo not found");
                    return false;
                };
                todo.toggle();
                tracing::debug!(%id, done = todo.done, "Todo toggled");
                true
            },
            TodoAction::TodoDeleted { id } => {
                let before = state.todos.len();
                state.todos.retain(|t| t.id != *id);
                let removed = state.todos.len() != before;
                if removed {
                    tracing::debug!(%id, count = state.count(), "Todo deleted");
                } else {
                    tracing::debug!(%id, "Ignoring delete: todo not found");
                }
                removed
            },
            // Commands are not applied to state
            TodoAction::InputChanged { .. }
            | TodoAction::AddTodo
            | TodoAction::SubmitInput
            | TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. } => false,
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::InputChanged { text } => {
                state.input_text = text;
            },

            TodoAction::AddTodo => {
                Self::add_from_input(state, env);
            },

            // Enter submits the form, which presses Add
            TodoAction::SubmitInput => {
                return smallvec![Effect::dispatch(TodoAction::AddTodo)];
            },

            TodoAction::ToggleTodo { id } => {
                Self::apply_event(state, &TodoAction::TodoToggled { id });
            },

            TodoAction::DeleteTodo { id } => {
                Self::apply_event(state, &TodoAction::TodoDeleted { id });
            },

            // ========== Events ==========
            TodoAction::TodoAdded { .. }
            | TodoAction::TodoToggled { .. }
            | TodoAction::TodoDeleted { .. } => {
                Self::apply_event(state, &action);
            },
        }

        SmallVec::new()
    }
}
