//! Periodic drivers: production ticks, autosave, cooldown decay.
//!
//! All engine mutation stays on one thread: the engine is shared as
//! `Rc<RefCell<Engine>>` and the three tasks are `spawn_local`ed onto the
//! current thread's `LocalSet`, so turns are sequential and non-preemptive —
//! a tick can interleave with a click between borrows, but never observe a
//! torn state. The tasks are owned by [`Driver`] and stop firing the moment
//! [`Driver::shutdown`] runs.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::engine::Engine;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Handle to the running periodic tasks.
pub struct Driver {
    engine: Rc<RefCell<Engine>>,
    handles: Vec<JoinHandle<()>>,
}

impl Driver {
    /// Start the production ticker (`ticks_per_sec`), the autosave ticker
    /// (`autosave_interval_secs`), and the 1 Hz cooldown ticker. Must be
    /// called from within a `LocalSet` (or a `#[tokio::main]`/`run_until`
    /// body that provides one).
    pub fn spawn(engine: Rc<RefCell<Engine>>) -> Self {
        let tuning = engine.borrow().tuning().clone();
        let mut handles = Vec::with_capacity(3);

        {
            let engine = Rc::clone(&engine);
            let ticks_per_sec = tuning.ticks_per_sec.max(1);
            let delta_seconds = 1.0 / f64::from(ticks_per_sec);
            let period = Duration::from_millis(1_000 / u64::from(ticks_per_sec));
            handles.push(tokio::task::spawn_local(async move {
                let mut ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                ticker.tick().await; // completes immediately; skip it
                loop {
                    ticker.tick().await;
                    engine.borrow_mut().tick(delta_seconds);
                }
            }));
        }

        {
            let engine = Rc::clone(&engine);
            let period = Duration::from_secs(tuning.autosave_interval_secs.max(1));
            handles.push(tokio::task::spawn_local(async move {
                let mut ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    engine.borrow_mut().save(now_ms());
                }
            }));
        }

        {
            let engine = Rc::clone(&engine);
            handles.push(tokio::task::spawn_local(async move {
                let mut ticker = interval(Duration::from_secs(1));
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    engine.borrow_mut().tick_ad_cooldown(1, now_ms());
                }
            }));
        }

        Self { engine, handles }
    }

    /// Cancel all periodic tasks and flush one last snapshot, best effort.
    /// No task fires after this returns.
    pub fn shutdown(self) {
        for handle in &self.handles {
            handle.abort();
        }
        debug!("drivers stopped; final flush");
        self.engine.borrow_mut().save(now_ms());
    }
}
