//! Todo list in a vintage desktop window.
//!
//! The list lives in a [`retro_runtime::Store`]: typing, clicking "Add",
//! pressing Enter, clicking a row or its "Delete" button all become
//! [`TodoAction`] commands, which the [`TodoReducer`] turns into events and
//! applies to [`TodoState`]. The screen is a pure function of that state
//! ([`view::render`]) painted into the terminal by [`ui::paint`].
//!
//! # Quick Start
//!
//! ```
//! use retro_todo::{TodoAction, TodoState, app};
//!
//! let mut store = app::build_store(app::production_environment());
//!
//! store.send(TodoAction::InputChanged { text: "Buy milk".to_string() })?;
//! store.send(TodoAction::SubmitInput)?;
//!
//! assert_eq!(store.state(TodoState::count), 1);
//! assert_eq!(store.state(TodoState::remaining_count), 1);
//! # Ok::<(), retro_runtime::StoreError>(())
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod reducer;
pub mod telemetry;
pub mod types;
pub mod ui;
pub mod view;

pub use config::Config;
pub use error::AppError;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoId, TodoItem, TodoState};
