use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use sprint::runtime::{Countdown, SprintEvent};
use sprint::session::{Session, SESSION_SECS};

// Headless integration using the runtime channel + Session without a TTY.
// Verifies that the event plumbing drives a session the same way the TUI
// loop does.

#[test]
fn headless_typing_flow_completes() {
    let mut session = Session::new("go fast".to_string());
    let (tx, rx) = mpsc::channel();

    // type the whole sample, then let a fast countdown run the clock out
    for c in "go fast".chars() {
        session.write(c);
    }
    let countdown = Countdown::with_interval(tx, Duration::from_millis(1));

    while !session.has_finished() {
        if let SprintEvent::Tick = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("countdown stalled")
        {
            session.tick();
        }
    }
    countdown.cancel();

    assert_eq!(session.seconds_remaining, 0);
    assert_eq!(session.wpm, 2);
    assert_eq!(session.errors(), 0);
}

#[test]
fn headless_key_events_drive_the_session() {
    let (tx, rx) = mpsc::channel();
    for c in "hi".chars() {
        tx.send(SprintEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }
    drop(tx);

    let mut session = Session::new("hi there".to_string());
    while let Ok(ev) = rx.recv() {
        if let SprintEvent::Key(key) = ev {
            if let KeyCode::Char(c) = key.code {
                session.write(c);
            }
        }
    }

    assert!(session.is_running());
    assert_eq!(session.input.len(), 2);
    assert_eq!(session.errors(), 0);
}

#[test]
fn headless_input_rejected_after_expiry() {
    let mut session = Session::new("hi".to_string());
    let (tx, rx) = mpsc::channel();

    session.write('h');
    let countdown = Countdown::with_interval(tx, Duration::from_millis(1));

    while !session.has_finished() {
        if let SprintEvent::Tick = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("countdown stalled")
        {
            session.tick();
        }
    }
    countdown.cancel();

    let frozen_wpm = session.wpm;
    session.write('i');
    session.backspace();

    assert_eq!(session.input, vec!['h']);
    assert_eq!(session.wpm, frozen_wpm);
}

#[test]
fn countdown_cancelled_on_reset_leaves_a_fresh_clock() {
    let mut session = Session::new("steady now".to_string());
    let (tx, rx) = mpsc::channel();

    session.write('s');
    let countdown = Countdown::with_interval(tx, Duration::from_millis(5));

    for _ in 0..3 {
        if let SprintEvent::Tick = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("countdown stalled")
        {
            session.tick();
        }
    }
    assert!(session.seconds_remaining < SESSION_SECS);

    // leaving Running cancels the task; any straggler tick is a no-op
    session.reset();
    countdown.cancel();
    std::thread::sleep(Duration::from_millis(50));
    while let Ok(ev) = rx.try_recv() {
        if let SprintEvent::Tick = ev {
            session.tick();
        }
    }

    assert!(session.is_idle());
    assert_eq!(session.seconds_remaining, SESSION_SECS);
}
