//! Terminal session: store, event loop and terminal lifecycle.

use crate::config::Config;
use crate::error::Result;
use crate::input::{self, Intent};
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoState};
use crate::ui::{self, HitMap};
use crate::view;
use crossterm::{
    cursor::Show,
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use retro_core::environment::{RandomIdGenerator, SystemClock};
use retro_runtime::{Store, StoreConfig};
use std::cell::Cell;
use std::io;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::sync::Arc;

/// Store specialised for the todo list
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Most actions one todo `send` may run: Enter dispatches a single `AddTodo`
pub const MAX_DISPATCH_DEPTH: usize = 4;

/// Create a store holding an empty list
#[must_use]
pub fn build_store(environment: TodoEnvironment) -> TodoStore {
    Store::with_config(
        TodoState::new(),
        TodoReducer::new(),
        environment,
        StoreConfig::default().with_max_dispatch_depth(MAX_DISPATCH_DEPTH),
    )
}

/// Environment with the wall clock and random ids
#[must_use]
pub fn production_environment() -> TodoEnvironment {
    TodoEnvironment::new(Arc::new(SystemClock), Arc::new(RandomIdGenerator))
}

/// One running instance of the todo window
///
/// Owns the store and the click regions of the last frame. A store observer
/// marks the session dirty so the screen is only redrawn after a state
/// change or a resize.
pub struct Session {
    store: TodoStore,
    hits: HitMap,
    dirty: Rc<Cell<bool>>,
}

impl Session {
    /// Start a session with an empty list
    #[must_use]
    pub fn new(environment: TodoEnvironment) -> Self {
        let mut store = build_store(environment);
        let dirty = Rc::new(Cell::new(true));

        let flag = Rc::clone(&dirty);
        store.subscribe(move |action, state| {
            tracing::trace!(
                action,
                todos = state.count(),
                remaining = state.remaining_count(),
                "State changed"
            );
            flag.set(true);
        });

        Self {
            store,
            hits: HitMap::default(),
            dirty,
        }
    }

    /// Handle one terminal event
    ///
    /// Returns [`ControlFlow::Break`] when the user asked to quit; the store
    /// is shut down at that point.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the resulting action.
    pub fn handle(&mut self, event: &Event) -> Result<ControlFlow<()>> {
        if matches!(event, Event::Resize(..)) {
            self.dirty.set(true);
        }

        let intent = self
            .store
            .state(|state| input::map_event(event, &state.input_text, &self.hits));

        match intent {
            Intent::Dispatch(action) => {
                self.store.send(action)?;
                Ok(ControlFlow::Continue(()))
            },
            Intent::Quit => {
                self.store.shutdown();
                Ok(ControlFlow::Break(()))
            },
            Intent::Ignore => Ok(ControlFlow::Continue(())),
        }
    }

    /// True when the screen no longer matches the state
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.dirty.get()
    }

    /// Render the current state and remember where the triggers landed
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to draw.
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let view = self.store.state(view::render);
        let mut hits = HitMap::default();
        terminal.draw(|frame| hits = ui::paint(frame, &view))?;
        self.hits = hits;
        self.dirty.set(false);
        Ok(())
    }

    /// Read the current state
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TodoState) -> T,
    {
        self.store.state(f)
    }
}

/// Raw mode and alternate screen, restored on drop
struct TerminalGuard {
    mouse: bool,
}

impl TerminalGuard {
    fn enter(mouse: bool) -> io::Result<Self> {
        enable_raw_mode()?;
        // Restores raw mode if the rest of the setup fails
        let guard = Self { mouse };

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        if mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse {
            if let Err(e) = execute!(stdout, DisableMouseCapture) {
                tracing::warn!(error = %e, "Failed to disable mouse capture");
            }
        }
        if let Err(e) = execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen, Show) {
            tracing::warn!(error = %e, "Failed to leave alternate screen");
        }
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "Failed to disable raw mode");
        }
    }
}

/// Run the todo window until the user quits
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to or read from.
pub fn run(config: &Config) -> Result<()> {
    let mut session = Session::new(production_environment());

    let _guard = TerminalGuard::enter(config.mouse)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    tracing::info!(
        mouse = config.mouse,
        poll_interval = ?config.poll_interval,
        "Session started"
    );

    loop {
        if session.needs_redraw() {
            session.draw(&mut terminal)?;
        }

        if !event::poll(config.poll_interval)? {
            continue;
        }

        if session.handle(&event::read()?)?.is_break() {
            break;
        }
    }

    tracing::info!(
        todos = session.state(TodoState::count),
        remaining = session.state(TodoState::remaining_count),
        "Session ended"
    );
    Ok(())
}
