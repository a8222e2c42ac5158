use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// A callback invoked repeatedly on a dedicated thread.
///
/// Before each invocation the timer waits for its period minus the time the
/// previous invocation took, so a callback that takes longer than the period
/// is invoked again immediately.
///
/// The callback runs concurrently with the thread that started the timer. Any
/// state it shares with a [`WidgetTree`](crate::WidgetTree) must be
/// synchronized by the caller.
#[derive(Debug, Default)]
pub struct Timer {
    active: Option<ActiveTimer>,
}

#[derive(Debug)]
struct ActiveTimer {
    shared: Arc<Shared>,
    thread: JoinHandle<()>,
}

#[derive(Debug)]
struct Shared {
    running: Mutex<bool>,
    sync: Condvar,
}

impl Timer {
    /// Returns a timer that is not running.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Returns a timer that is already invoking `callback` every `period`.
    pub fn started<F>(period: Duration, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let mut timer = Self::new();
        timer.start(period, callback);
        timer
    }

    /// Invokes `callback` every `period` until stopped.
    ///
    /// A running timer is stopped first. A zero `period` leaves the timer
    /// stopped.
    pub fn start<F>(&mut self, period: Duration, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.stop();
        if period.is_zero() {
            tracing::debug!("ignoring timer with a zero period");
            return;
        }

        let shared = Arc::new(Shared {
            running: Mutex::new(true),
            sync: Condvar::new(),
        });
        let thread = thread::spawn({
            let shared = shared.clone();
            move || timer_loop(&shared, period, callback)
        });
        tracing::debug!(?period, "timer started");
        self.active = Some(ActiveTimer { shared, thread });
    }

    /// Stops invoking the callback.
    ///
    /// When called from outside of the callback, this waits for an invocation
    /// in progress to finish.
    pub fn stop(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        *active.shared.running.lock() = false;
        active.shared.sync.notify_all();

        if active.thread.thread().id() == thread::current().id() {
            return;
        }
        if active.thread.join().is_err() {
            tracing::error!("timer callback panicked");
        }
        tracing::debug!("timer stopped");
    }

    /// Returns true if the callback is still scheduled to be invoked.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| *active.shared.running.lock() && !active.thread.is_finished())
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn timer_loop<F>(shared: &Shared, period: Duration, mut callback: F)
where
    F: FnMut(),
{
    let mut last_duration = Duration::ZERO;
    let mut running = shared.running.lock();
    loop {
        let wait = period.saturating_sub(last_duration);
        if !wait.is_zero() {
            let deadline = Instant::now() + wait;
            while *running {
                if shared.sync.wait_until(&mut running, deadline).timed_out() {
                    break;
                }
            }
        }
        if !*running {
            break;
        }
        drop(running);

        let start = Instant::now();
        callback();
        last_duration = start.elapsed();

        running = shared.running.lock();
    }
}
