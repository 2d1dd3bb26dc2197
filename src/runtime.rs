use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum SprintEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Forward crossterm input into the app's event channel from a background
/// thread. The thread exits once the receiving side hangs up.
pub fn spawn_input_listener(tx: Sender<SprintEvent>) {
    thread::spawn(move || loop {
        match event::read() {
            Ok(CtEvent::Key(key)) => {
                if tx.send(SprintEvent::Key(key)).is_err() {
                    break;
                }
            }
            Ok(CtEvent::Resize(_, _)) => {
                if tx.send(SprintEvent::Resize).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });
}

/// Handle to the repeating countdown task.
///
/// The app holds one of these only while a session is `Running` and cancels
/// it on every exit from that state (finish, reset, paragraph change). The
/// task checks the flag before each send, so after `cancel()` returns at most
/// one already-in-flight tick can still be delivered; the session's phase
/// guard makes that tick a no-op.
#[derive(Debug)]
pub struct Countdown {
    cancelled: Arc<AtomicBool>,
}

impl Countdown {
    /// Start a task that emits `Tick` once per elapsed second.
    pub fn start(tx: Sender<SprintEvent>) -> Self {
        Self::with_interval(tx, Duration::from_secs(1))
    }

    /// Same task on a custom interval; lets tests run the clock fast.
    pub fn with_interval(tx: Sender<SprintEvent>, interval: Duration) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        thread::spawn(move || loop {
            thread::sleep(interval);
            if flag.load(Ordering::Relaxed) {
                break;
            }
            if tx.send(SprintEvent::Tick).is_err() {
                break;
            }
        });

        Self { cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
