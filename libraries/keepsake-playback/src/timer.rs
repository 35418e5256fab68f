//! Auto-advance timer
//!
//! Owns at most one repeating tokio task. Every `start` first stops the
//! previous task, so two timers can never tick side by side.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Repeating auto-advance timer
pub struct PlaybackTimer {
    /// Autoplay flag; `start` is a no-op while false
    enabled: bool,

    /// Delay between ticks
    period: Duration,

    /// Live timer task, if armed
    handle: Option<JoinHandle<()>>,
}

impl PlaybackTimer {
    /// Create a disarmed timer
    pub fn new(enabled: bool, period: Duration) -> Self {
        Self {
            enabled,
            period,
            handle: None,
        }
    }

    /// Whether autoplay is on
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the autoplay flag without arming or disarming
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether a timer task is armed
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Arm the timer, calling `on_tick` once per period
    ///
    /// The first tick fires one full period after arming. Returns whether the
    /// timer was armed (false while autoplay is off). Must be called inside a
    /// tokio runtime.
    pub fn start<F>(&mut self, mut on_tick: F) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        if !self.enabled {
            return false;
        }

        self.stop();

        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                on_tick();
            }
        }));

        true
    }

    /// Disarm the timer; idempotent
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PlaybackTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
