//! Tests for the playback state machine against recording collaborators.

use std::rc::Rc;
use std::time::Duration;

use code_movie::{Notice, Status};

use crate::helpers::{load_fixture, record, Harness, Log, SurfaceCall};

const TWO_STEPS: &str = "fn main() {}\n@@@\nstep: 1\nstep: 2";

// ============================================================================
// Entering playback
// ============================================================================

#[test]
fn load_sets_surface_content() {
    let harness = Harness::new();
    let mut player = harness.player;
    player.load_annotated(TWO_STEPS).unwrap();

    assert_eq!(
        *harness.calls.borrow(),
        vec![SurfaceCall::SetContent("fn main() {}".to_string())]
    );
}

#[test]
fn play_from_idle_reverts_locks_and_focuses() {
    let mut harness = Harness::loaded(TWO_STEPS);
    harness.player.play();

    assert_eq!(harness.player.status(), Status::Playing);
    assert_eq!(
        harness.take_calls(),
        vec![
            SurfaceCall::Revert,
            SurfaceCall::SetReadOnly(true),
            SurfaceCall::Focus
        ]
    );
}

#[test]
fn play_while_playing_touches_nothing() {
    let mut harness = Harness::loaded(TWO_STEPS);
    harness.player.play();
    harness.take_calls();

    harness.player.play();

    assert!(harness.take_calls().is_empty());
    assert_eq!(harness.player.status(), Status::Playing);
}

#[test]
fn empty_document_finishes_immediately() {
    let mut harness = Harness::loaded("just code");
    harness.player.play();

    assert_eq!(harness.player.status(), Status::Idle);
    assert_eq!(harness.notices(), vec![Notice::Finished]);
    assert_eq!(harness.take_calls(), vec![SurfaceCall::SetReadOnly(false)]);
}

#[test]
fn pause_while_idle_then_play_does_full_entry() {
    let mut harness = Harness::loaded(TWO_STEPS);
    harness.player.pause();
    assert_eq!(harness.player.status(), Status::Idle);
    assert!(harness.take_calls().is_empty());

    harness.player.play();

    assert_eq!(
        harness.take_calls(),
        vec![
            SurfaceCall::Revert,
            SurfaceCall::SetReadOnly(true),
            SurfaceCall::Focus
        ]
    );
}

// ============================================================================
// Pause / resume
// ============================================================================

#[test]
fn pause_leaves_surface_alone() {
    let mut harness = Harness::loaded(TWO_STEPS);
    harness.player.play();
    harness.take_calls();

    harness.player.pause();

    assert_eq!(harness.player.status(), Status::Paused);
    assert!(harness.take_calls().is_empty());
}

#[test]
fn resume_only_refocuses() {
    let mut harness = Harness::loaded(TWO_STEPS);
    harness.player.play();
    harness.player.pause();
    harness.take_calls();

    harness.player.play();

    assert_eq!(harness.take_calls(), vec![SurfaceCall::Focus]);
    assert_eq!(harness.player.status(), Status::Playing);
}

#[test]
fn resume_keeps_action_index() {
    let mut harness = Harness::loaded(TWO_STEPS);
    harness.player.play();
    harness.player.advance();
    harness.player.pause();
    harness.player.play();

    assert_eq!(harness.player.action_index(), 1);
}

// ============================================================================
// Deferred calls
// ============================================================================

#[test]
fn queued_calls_run_in_order_after_resume() {
    let mut harness = Harness::loaded(TWO_STEPS);
    let log: Log = Rc::default();
    harness.player.play();
    harness.player.pause();

    harness.player.request_timer(record(&log, "f1"), Duration::ZERO);
    harness
        .player
        .request_timer(record(&log, "f2"), Duration::from_millis(10));
    assert!(log.borrow().is_empty());

    harness.player.play();
    assert_eq!(*log.borrow(), vec!["f1"]);
    assert_eq!(harness.clock.scheduled(), 1);

    harness
        .clock
        .run_for(&mut harness.player, Duration::from_millis(10));
    assert_eq!(*log.borrow(), vec!["f1", "f2"]);
}

#[test]
fn replayed_delays_are_honored() {
    let mut harness = Harness::loaded(TWO_STEPS);
    let log: Log = Rc::default();
    harness.player.play();
    harness.player.pause();
    harness
        .player
        .request_timer(record(&log, "late"), Duration::from_millis(300));

    harness
        .clock
        .run_for(&mut harness.player, Duration::from_secs(5));
    harness.player.play();
    harness
        .clock
        .run_for(&mut harness.player, Duration::from_millis(299));
    assert!(log.borrow().is_empty());

    harness
        .clock
        .run_for(&mut harness.player, Duration::from_millis(1));
    assert_eq!(*log.borrow(), vec!["late"]);
}

#[test]
fn replayed_call_can_enqueue_more_after_pausing() {
    let mut harness = Harness::loaded(TWO_STEPS);
    let log: Log = Rc::default();
    harness.player.play();
    harness.player.pause();

    let inner = Rc::clone(&log);
    harness.player.request_timer(
        move |player| {
            inner.borrow_mut().push("first");
            player.pause();
            player.request_timer(record(&inner, "requeued"), Duration::ZERO);
        },
        Duration::ZERO,
    );
    harness.player.request_timer(record(&log, "second"), Duration::ZERO);

    harness.player.play();
    assert_eq!(*log.borrow(), vec!["first"]);
    assert_eq!(harness.player.pending_calls(), 2);

    harness.player.play();
    assert_eq!(*log.borrow(), vec!["first", "second", "requeued"]);
    assert_eq!(harness.player.pending_calls(), 0);
}

#[test]
fn timer_chain_advances_through_actions() {
    let mut harness = Harness::loaded("x\n@@@\na: 1\nb: 2\nc: 3");
    harness.player.play();

    fn step(player: &mut code_movie::Player) {
        if player.status() != Status::Playing {
            return;
        }
        if player.action_index() + 1 < player.total_actions() as isize {
            player.advance();
            player.request_timer(step, Duration::from_millis(100));
        } else {
            player.finish();
        }
    }
    harness.player.request_timer(step, Duration::from_millis(100));

    harness
        .clock
        .run_for(&mut harness.player, Duration::from_millis(250));
    assert_eq!(harness.player.action_index(), 2);
    assert_eq!(harness.player.status(), Status::Playing);

    harness
        .clock
        .run_for(&mut harness.player, Duration::from_millis(50));
    assert_eq!(harness.player.status(), Status::Idle);
    assert_eq!(harness.notices(), vec![Notice::Finished]);
}

// ============================================================================
// Stop / finish
// ============================================================================

#[test]
fn stop_resets_and_notifies_once_per_call() {
    let mut harness = Harness::loaded(TWO_STEPS);
    harness.player.play();
    harness.player.advance();
    harness.player.pause();
    harness.player.request_timer(|_| {}, Duration::ZERO);
    harness.take_calls();

    harness.player.stop();
    let after_first = (
        harness.player.status(),
        harness.player.action_index(),
        harness.player.pending_calls(),
    );
    harness.player.stop();

    assert_eq!(after_first, (Status::Idle, 0, 0));
    assert_eq!(
        (
            harness.player.status(),
            harness.player.action_index(),
            harness.player.pending_calls()
        ),
        after_first
    );
    assert_eq!(
        harness.take_calls(),
        vec![SurfaceCall::SetReadOnly(false), SurfaceCall::SetReadOnly(false)]
    );
    assert_eq!(harness.notices(), vec![Notice::Stopped, Notice::Stopped]);
}

#[test]
fn finish_notifies_finished() {
    let mut harness = Harness::loaded(TWO_STEPS);
    harness.player.play();
    harness.player.finish();

    assert_eq!(harness.player.status(), Status::Idle);
    assert_eq!(harness.notices(), vec![Notice::Finished]);
}

#[test]
fn in_flight_timer_survives_stop() {
    let mut harness = Harness::loaded(TWO_STEPS);
    let log: Log = Rc::default();
    harness.player.play();
    harness
        .player
        .request_timer(record(&log, "stale"), Duration::from_millis(20));
    harness.player.stop();

    assert_eq!(harness.player.in_flight_timers(), 1);
    harness
        .clock
        .run_for(&mut harness.player, Duration::from_millis(20));

    assert_eq!(*log.borrow(), vec!["stale"]);
    assert_eq!(harness.player.status(), Status::Idle);
}

#[test]
fn stale_timer_cannot_step_a_later_session() {
    let mut harness = Harness::loaded(TWO_STEPS);
    harness.player.play();
    harness.player.request_timer(
        |player| player.request_timer(|player| player.advance(), Duration::ZERO),
        Duration::from_millis(10),
    );
    harness.player.stop();
    harness
        .clock
        .run_for(&mut harness.player, Duration::from_millis(10));

    harness.player.play();
    harness.player.pause();
    harness.player.play();

    assert_eq!(harness.player.action_index(), 0);
    assert_eq!(harness.player.pending_calls(), 0);
}

// ============================================================================
// Input modes
// ============================================================================

#[test]
fn prebuilt_document_plays_like_parsed_text() {
    let text = load_fixture("login_walkthrough.txt");
    let parsed = code_movie::parse(&text).unwrap();

    let mut from_text = Harness::new();
    from_text.player.load_annotated(&text).unwrap();

    let mut from_document = Harness::new();
    from_document.player.load_document(parsed);

    assert_eq!(from_text.player.document(), from_document.player.document());
    assert_eq!(from_text.take_calls(), from_document.take_calls());

    from_text.player.play();
    from_document.player.play();
    assert_eq!(from_text.player.status(), from_document.player.status());
    assert_eq!(from_text.player.total_actions(), 4);
}
