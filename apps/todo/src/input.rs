//! Terminal events to todo actions.
//!
//! The entry field is a controlled input: every keystroke is turned into the
//! field's complete new contents and sent as [`TodoAction::InputChanged`].

use crate::types::TodoAction;
use crate::ui::HitMap;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use unicode_segmentation::UnicodeSegmentation;

/// What the application should do with a terminal event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Send an action to the store
    Dispatch(TodoAction),
    /// End the session
    Quit,
    /// Nothing to do
    Ignore,
}

/// Map one terminal event, given the current input text and the last click regions
#[must_use]
pub fn map_event(event: &Event, input_text: &str, hits: &HitMap) -> Intent {
    match event {
        Event::Key(key) => map_key(key, input_text),
        Event::Mouse(mouse) => map_mouse(mouse, hits),
        Event::Paste(pasted) => {
            let pasted = pasted.replace(['\r', '\n'], " ");
            if pasted.is_empty() {
                Intent::Ignore
            } else {
                changed(format!("{input_text}{pasted}"))
            }
        },
        Event::Resize(..) | Event::FocusGained | Event::FocusLost => Intent::Ignore,
    }
}

fn map_key(key: &KeyEvent, input_text: &str) -> Intent {
    if key.kind == KeyEventKind::Release {
        return Intent::Ignore;
    }

    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if control => Intent::Quit,
        KeyCode::Esc => Intent::Quit,
        KeyCode::Enter => Intent::Dispatch(TodoAction::SubmitInput),
        KeyCode::Backspace => {
            let Some((last, _)) = input_text.grapheme_indices(true).next_back() else {
                return Intent::Ignore;
            };
            changed(input_text[..last].to_string())
        },
        KeyCode::Char(c) if !control && !key.modifiers.contains(KeyModifiers::ALT) => {
            changed(format!("{input_text}{c}"))
        },
        _ => Intent::Ignore,
    }
}

fn map_mouse(mouse: &MouseEvent, hits: &HitMap) -> Intent {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => hits
            .target_at(mouse.column, mouse.row)
            .map_or(Intent::Ignore, |target| Intent::Dispatch(target.action())),
        _ => Intent::Ignore,
    }
}

const fn changed(text: String) -> Intent {
    Intent::Dispatch(TodoAction::InputChanged { text })
}
