//! Pure view tree for the todo window.
//!
//! [`render`] maps a [`TodoState`] to an [`AppView`] describing everything
//! on screen. It performs no I/O and knows nothing about terminals; the
//! painter in [`crate::ui`] draws the tree.

use crate::types::{TodoId, TodoItem, TodoState};

/// Menu bar caption
pub const MENU_TITLE: &str = "🖥️ Utopia Mac";
/// Window title
pub const WINDOW_TITLE: &str = "Todo List";
/// Entry field placeholder shown while the input is empty
pub const INPUT_PLACEHOLDER: &str = "New todo";
/// Label of the add trigger
pub const ADD_LABEL: &str = "Add";
/// Label of the per-row delete trigger
pub const DELETE_LABEL: &str = "Delete";
/// Glyph of a done todo
pub const CHECKED_GLYPH: &str = "✅";
/// Glyph of a pending todo
pub const UNCHECKED_GLYPH: &str = "⬜";

/// Whole screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppView {
    /// Caption of the static menu bar
    pub menu_title: &'static str,
    /// The todo window
    pub window: WindowView,
}

/// The window chrome and its contents
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowView {
    /// Title bar caption
    pub title: &'static str,
    /// Item count badge next to the title
    pub badge: usize,
    /// Entry field
    pub input: InputView,
    /// Label of the add trigger
    pub add_label: &'static str,
    /// One row per todo, in list order
    pub rows: Vec<RowView>,
    /// Remaining-count label
    pub footer: String,
}

/// Controlled entry field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputView {
    /// Exactly the state's input text
    pub value: String,
    /// Shown in place of an empty value
    pub placeholder: &'static str,
}

impl InputView {
    /// Whether the placeholder is showing
    #[must_use]
    pub fn shows_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Visual treatment of a row, a function of the done flag only
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowStyle {
    /// Empty box, normal text, highlighted background
    Pending,
    /// Checked glyph, strikethrough, muted text, neutral background
    Completed,
}

impl RowStyle {
    /// Style for a given done flag
    #[must_use]
    pub const fn for_done(done: bool) -> Self {
        if done { Self::Completed } else { Self::Pending }
    }

    /// Glyph drawn before the text
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Pending => UNCHECKED_GLYPH,
            Self::Completed => CHECKED_GLYPH,
        }
    }

    /// Text is struck through
    #[must_use]
    pub const fn strikethrough(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Text uses the muted color
    #[must_use]
    pub const fn muted(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Row background is highlighted rather than neutral
    #[must_use]
    pub const fn highlighted(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// One todo row: toggle trigger (glyph and text) plus delete trigger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    /// Todo the row's triggers act on
    pub id: TodoId,
    /// Todo text as stored
    pub text: String,
    /// Visual treatment
    pub style: RowStyle,
    /// Label of the delete trigger
    pub delete_label: &'static str,
}

impl RowView {
    fn from_item(item: &TodoItem) -> Self {
        Self {
            id: item.id,
            text: item.text.clone(),
            style: RowStyle::for_done(item.done),
            delete_label: DELETE_LABEL,
        }
    }

    /// Toggle trigger caption: glyph, space, text
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.style.glyph(), self.text)
    }
}

/// Footer text for a remaining count
#[must_use]
pub fn remaining_label(remaining: usize) -> String {
    format!("{remaining} items remaining")
}

/// Build the view tree for the current state
#[must_use]
pub fn render(state: &TodoState) -> AppView {
    AppView {
        menu_title: MENU_TITLE,
        window: WindowView {
            title: WINDOW_TITLE,
            badge: state.count(),
            input: InputView {
                value: state.input_text.clone(),
                placeholder: INPUT_PLACEHOLDER,
            },
            add_label: ADD_LABEL,
            rows: state.todos.iter().map(RowView::from_item).collect(),
            footer: remaining_label(state.remaining_count()),
        },
    }
}
