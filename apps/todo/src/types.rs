//! Domain types for the todo list.
//!
//! A todo list is an insertion-ordered sequence of items plus the text the
//! user is currently typing. Items can be added, toggled, and deleted.

use chrono::{DateTime, Utc};
use retro_core::Uuid;
use retro_macros::Action;

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Text as typed, never blank
    pub text: String,
    /// Whether the todo is done
    pub done: bool,
    /// When the todo was added
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a new pending todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            done: false,
            created_at,
        }
    }

    /// Flips the done flag
    pub const fn toggle(&mut self) {
        self.done = !self.done;
    }
}

/// State of one todo session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// All todos, oldest first
    pub todos: Vec<TodoItem>,
    /// Pending text of the entry field
    pub input_text: String,
}

impl TodoState {
    /// Creates an empty session: no todos, empty input
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: Vec::new(),
            input_text: String::new(),
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of done todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.done).count()
    }

    /// Returns the number of todos not yet done
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.done).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|t| t.id == *id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// True when the entry field holds nothing but whitespace
    #[must_use]
    pub fn input_is_blank(&self) -> bool {
        self.input_text.trim().is_empty()
    }
}

/// Actions representing commands and events for the todo list
///
/// Commands come from the user interface. The reducer turns accepted
/// commands into events and applies them; events can also be sent directly.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: The entry field now holds `text`
    #[command]
    InputChanged {
        /// Full contents of the field
        text: String,
    },

    /// Command: The "Add" button was activated
    #[command]
    AddTodo,

    /// Command: Enter was pressed in the entry field
    #[command]
    SubmitInput,

    /// Command: Flip the done flag of a todo
    #[command]
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Command: Remove a todo
    #[command]
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    // ========== Events ==========
    /// Event: Todo was added at the end of the list
    #[event]
    TodoAdded {
        /// Todo identifier
        id: TodoId,
        /// Text of the todo
        text: String,
        /// When the todo was added
        created_at: DateTime<Utc>,
    },

    /// Event: Todo done flag was flipped
    #[event]
    TodoToggled {
        /// Todo identifier
        id: TodoId,
    },

    /// Event: Todo was removed
    #[event]
    TodoDeleted {
        /// Todo identifier
        id: TodoId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_core::action::Action as _;
    use retro_core::environment::Clock;
    use retro_testing::{SequentialIdGenerator, test_clock};

    fn id(n: u64) -> TodoId {
        TodoId::from_uuid(SequentialIdGenerator::nth(n))
    }

    #[test]
    fn todo_id_display() {
        let display = format!("{}", id(1));
        assert_eq!(display, "00000000-0000-0000-0000-000000000001");
    }

    #[test]
    fn todo_item_new() {
        let now = test_clock().now();
        let item = TodoItem::new(id(1), "Test todo".to_string(), now);

        assert_eq!(item.id, id(1));
        assert_eq!(item.text, "Test todo");
        assert!(!item.done);
        assert_eq!(item.created_at, now);
    }

    #[test]
    fn todo_item_toggle_twice() {
        let mut item = TodoItem::new(id(1), "Test".to_string(), test_clock().now());

        item.toggle();
        assert!(item.done);

        item.toggle();
        assert!(!item.done);
    }

    #[test]
    fn todo_state_counts() {
        let now = test_clock().now();
        let mut state = TodoState::new();
        assert_eq!(state.count(), 0);
        assert_eq!(state.remaining_count(), 0);

        state.todos.push(TodoItem::new(id(1), "Todo 1".to_string(), now));
        state.todos.push(TodoItem::new(id(2), "Todo 2".to_string(), now));
        state.todos[1].toggle();

        assert_eq!(state.count(), 2);
        assert_eq!(state.completed_count(), 1);
        assert_eq!(state.remaining_count(), 1);
        assert!(state.exists(&id(2)));
        assert!(!state.exists(&id(3)));
    }

    #[test]
    fn blank_input_detection() {
        let mut state = TodoState::new();
        assert!(state.input_is_blank());

        state.input_text = " \t ".to_string();
        assert!(state.input_is_blank());

        state.input_text = "  x ".to_string();
        assert!(!state.input_is_blank());
    }

    #[test]
    fn todo_action_is_command() {
        let action = TodoAction::ToggleTodo { id: id(1) };
        assert!(action.is_command());
        assert!(!action.is_event());
        assert_eq!(action.name(), "ToggleTodo");
    }

    #[test]
    fn todo_action_is_event() {
        let action = TodoAction::TodoAdded {
            id: id(1),
            text: "Test".to_string(),
            created_at: test_clock().now(),
        };
        assert!(action.is_event());
        assert!(!action.is_command());
    }
}
