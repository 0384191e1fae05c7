//! Tick-driven countdown.
//!
//! The timer owns no thread. A host scheduler calls [`CountdownTimer::on_tick`]
//! once per second with the [`TimerToken`] it was armed with; every start,
//! cancel, pause and resume moves the timer to a new epoch so ticks queued for
//! an earlier run are recognised as stale and dropped.

use std::fmt;

/// Identifies one run of a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn epoch(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerSignal {
    Tick { remaining: u32 },
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug)]
pub struct CountdownTimer {
    state: TimerState,
    epoch: u64,
    remaining: u32,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            epoch: 0,
            remaining: 0,
        }
    }

    /// Begin counting down from `seconds`, implicitly cancelling any run in progress.
    pub fn start(&mut self, seconds: u32) -> TimerToken {
        self.epoch += 1;
        self.remaining = seconds;
        self.state = TimerState::Running;
        TimerToken(self.epoch)
    }

    /// Stop without emitting an expiry.
    pub fn cancel(&mut self) {
        if self.state != TimerState::Idle {
            self.epoch += 1;
        }
        self.state = TimerState::Idle;
    }

    /// Suspend ticking, keeping the remaining time. No-op unless running.
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.epoch += 1;
        self.state = TimerState::Paused;
        true
    }

    /// Continue from the preserved remaining time. No-op unless paused.
    pub fn resume(&mut self) -> Option<TimerToken> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.epoch += 1;
        self.state = TimerState::Running;
        Some(TimerToken(self.epoch))
    }

    /// Advance by one second. Returns `None` for stale tokens or when not running.
    pub fn on_tick(&mut self, token: TimerToken) -> Option<TimerSignal> {
        if !self.accepts(token) {
            tracing::trace!(token = %token, live = self.epoch, "discarding stale timer tick");
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Idle;
            self.epoch += 1;
            Some(TimerSignal::Expired)
        } else {
            Some(TimerSignal::Tick {
                remaining: self.remaining,
            })
        }
    }

    /// Whether a tick stamped with `token` would be applied.
    pub fn accepts(&self, token: TimerToken) -> bool {
        self.state == TimerState::Running && token.0 == self.epoch
    }

    /// Token of the live run, if any.
    pub fn token(&self) -> Option<TimerToken> {
        match self.state {
            TimerState::Running => Some(TimerToken(self.epoch)),
            _ => None,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }
}
