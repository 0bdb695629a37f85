//! Tick-driven countdown for time-limited offers. Pure state: the chat
//! runtime supplies the once-per-second ticks. Reaching zero is terminal;
//! expiry is reported exactly once and the countdown is inert afterwards.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownTick {
    Running { remaining_secs: u32 },
    JustExpired,
    Inert,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferCountdown {
    remaining_secs: u32,
    fired: bool,
}

impl OfferCountdown {
    pub fn start(minutes: u32) -> Self {
        Self { remaining_secs: minutes.saturating_mul(60), fired: false }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.fired
    }

    /// Advance one second. Reports `JustExpired` on the tick that reaches
    /// zero and `Inert` on every tick after that.
    pub fn tick(&mut self) -> CountdownTick {
        if self.fired {
            return CountdownTick::Inert;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.fired = true;
            CountdownTick::JustExpired
        } else {
            CountdownTick::Running { remaining_secs: self.remaining_secs }
        }
    }

    /// Display form for live offer badges, e.g. `1h 59m 30s`.
    pub fn formatted(&self) -> String {
        let hours = self.remaining_secs / 3600;
        let minutes = (self.remaining_secs % 3600) / 60;
        let seconds = self.remaining_secs % 60;
        if hours > 0 {
            format!("{hours}h {minutes}m {seconds}s")
        } else {
            format!("{minutes}m {seconds}s")
        }
    }
}
