//! Integration tests for Store effect feedback
//!
//! A small reminder reducer whose commands dispatch clock-stamped events,
//! driven through the Store with the mocks from `retro-testing`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use retro_core::environment::Clock;
use retro_core::{DateTime, SmallVec, Utc, effect::Effect, reducer::Reducer, smallvec};
use retro_macros::Action;
use retro_runtime::{SendReport, Store, StoreConfig, StoreError};
use retro_testing::{FixedClock, ReducerTest, assertions, init_test_tracing, test_clock};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Action, Clone, Debug, PartialEq)]
enum ReminderAction {
    /// Ask for a reminder
    #[command]
    Remind { note: String },
    /// Ask for a reminder that re-arms itself forever
    #[command]
    Snooze,
    /// Reminder stored
    #[event]
    Reminded { note: String, at: DateTime<Utc> },
}

#[derive(Debug, Clone, Default)]
struct ReminderState {
    reminders: Vec<(String, DateTime<Utc>)>,
}

#[derive(Clone)]
struct ReminderEnvironment {
    clock: Arc<dyn Clock>,
}

struct ReminderReducer;

impl Reducer for ReminderReducer {
    type State = ReminderState;
    type Action = ReminderAction;
    type Environment = ReminderEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ReminderAction::Remind { note } if note.is_empty() => SmallVec::new(),
            ReminderAction::Remind { note } => smallvec![Effect::dispatch(ReminderAction::Reminded {
                note,
                at: env.clock.now(),
            })],
            ReminderAction::Snooze => smallvec![Effect::dispatch(ReminderAction::Snooze)],
            ReminderAction::Reminded { note, at } => {
                state.reminders.push((note, at));
                SmallVec::new()
            },
        }
    }
}

fn test_env() -> ReminderEnvironment {
    ReminderEnvironment {
        clock: Arc::new(test_clock()),
    }
}

fn remind(note: &str) -> ReminderAction {
    ReminderAction::Remind {
        note: note.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn command_reaches_state_through_dispatched_event() {
    init_test_tracing();
    let mut store = Store::new(ReminderState::default(), ReminderReducer, test_env());

    let report = store.send(remind("stand up")).unwrap();

    assert_eq!(
        report,
        SendReport {
            actions_processed: 2,
            effects_executed: 1,
        }
    );
    assert_eq!(
        store.state(|s| s.reminders.clone()),
        vec![("stand up".to_string(), test_clock().now())]
    );
}

#[test]
fn environment_clock_is_used() {
    let later = FixedClock::new(DateTime::<Utc>::from_timestamp(1_800_000_000, 0).unwrap());
    let mut store = Store::new(
        ReminderState::default(),
        ReminderReducer,
        ReminderEnvironment {
            clock: Arc::new(later.clone()),
        },
    );

    store.send(remind("water plants")).unwrap();

    assert_eq!(store.state(|s| s.reminders[0].1), later.now());
    assert_eq!(store.environment().clock.now(), later.now());
}

#[test]
fn observers_see_command_then_event() {
    let mut store = Store::new(ReminderState::default(), ReminderReducer, test_env());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |name, state: &ReminderState| {
        sink.borrow_mut().push((name, state.reminders.len()));
    });

    store.send(remind("a")).unwrap();
    store.send(remind("")).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![("Remind", 0), ("Reminded", 1), ("Remind", 1)]
    );
}

#[test]
fn runaway_feedback_hits_configured_limit() {
    let config = StoreConfig::default().with_max_dispatch_depth(3);
    let mut store = Store::with_config(ReminderState::default(), ReminderReducer, test_env(), config);

    let result = store.send(ReminderAction::Snooze);

    assert_eq!(result, Err(StoreError::DispatchLimitExceeded { limit: 3 }));
    // The store still accepts work afterwards
    store.send(remind("after")).unwrap();
    assert_eq!(store.into_state().reminders.len(), 1);
}

#[test]
fn reducer_alone_only_describes_the_event() {
    ReducerTest::new(ReminderReducer)
        .with_env(test_env())
        .given_state(ReminderState::default())
        .when_action(remind("stand up"))
        .then_state(|state| assert!(state.reminders.is_empty()))
        .then_effects(|effects| {
            assertions::assert_effects_count(effects, 1);
            assertions::assert_dispatches(effects, |a| {
                matches!(a, ReminderAction::Reminded { note, .. } if note == "stand up")
            });
        })
        .run();
}

#[test]
fn empty_note_is_ignored() {
    ReducerTest::new(ReminderReducer)
        .with_env(test_env())
        .given_state(ReminderState::default())
        .when_action(remind(""))
        .then_state(|state| assert!(state.reminders.is_empty()))
        .then_effects(assertions::assert_no_effects)
        .run();
}
