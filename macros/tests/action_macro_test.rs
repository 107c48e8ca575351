//! Tests for #[derive(Action)] macro

use retro_core::action::Action as _;
use retro_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum TodoAction {
    #[command]
    InputChanged { text: String },

    #[command]
    AddTodo,

    #[command]
    ToggleTodo(u64),

    #[event]
    TodoAdded { id: u64, text: String },

    #[event]
    TodoToggled(u64),

    Noop,
}

#[derive(Action, Clone, Debug)]
enum Wrapped<T> {
    #[command]
    Inner(T),
}

#[test]
fn test_is_command() {
    let action = TodoAction::InputChanged {
        text: "Test".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
}

#[test]
fn test_is_event() {
    let action = TodoAction::TodoAdded {
        id: 1,
        text: "Test".to_string(),
    };
    assert!(!action.is_command());
    assert!(action.is_event());
}

#[test]
fn test_names_match_variants() {
    assert_eq!(TodoAction::AddTodo.name(), "AddTodo");
    assert_eq!(TodoAction::ToggleTodo(3).name(), "ToggleTodo");
    assert_eq!(TodoAction::TodoToggled(3).name(), "TodoToggled");
    assert_eq!(
        TodoAction::InputChanged {
            text: String::new()
        }
        .name(),
        "InputChanged"
    );
}

#[test]
fn test_unmarked_variant_is_neither() {
    let action = TodoAction::Noop;
    assert!(!action.is_command());
    assert!(!action.is_event());
    assert_eq!(action.name(), "Noop");
}

#[test]
fn test_all_commands_identified() {
    let commands = vec![
        TodoAction::InputChanged {
            text: "a".to_string(),
        },
        TodoAction::AddTodo,
        TodoAction::ToggleTodo(1),
    ];

    for cmd in commands {
        assert!(cmd.is_command(), "Expected command: {cmd:?}");
        assert!(!cmd.is_event(), "Should not be event: {cmd:?}");
    }
}

#[test]
fn test_generic_enum() {
    let action = Wrapped::Inner("payload");
    assert!(action.is_command());
    assert_eq!(action.name(), "Inner");
}
