//! Fever mode: a timed scoring multiplier fed by a gauge
//!
//! The gauge fills from matches while `Normal`. Reaching the threshold flips
//! to `Fever`, after which the gauge only drains in step with the timer.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Fever state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeverState {
    Normal,
    Fever {
        /// Seconds of fever left
        remaining: f32,
        /// Session time (seconds) at activation
        activated_at: f32,
    },
}

/// Gauge plus mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fever {
    /// In `[0, fever_threshold]`
    pub gauge: f32,
    pub state: FeverState,
}

impl Default for Fever {
    fn default() -> Self {
        Self {
            gauge: 0.0,
            state: FeverState::Normal,
        }
    }
}

impl Fever {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.state, FeverState::Fever { .. })
    }

    /// Seconds of fever left, zero when not active
    pub fn remaining(&self) -> f32 {
        match self.state {
            FeverState::Fever { remaining, .. } => remaining,
            FeverState::Normal => 0.0,
        }
    }

    /// Scoring multiplier for the current mode
    #[inline]
    pub fn multiplier(&self) -> u64 {
        if self.is_active() { 2 } else { 1 }
    }

    /// Add gauge from a match. Ignored during fever.
    /// Returns true if this filled the gauge and started fever.
    pub fn add_gauge(&mut self, amount: f32, tuning: &Tuning, now: f32) -> bool {
        if self.is_active() || amount <= 0.0 {
            return false;
        }
        self.gauge = (self.gauge + amount).min(tuning.fever_threshold);
        if self.gauge >= tuning.fever_threshold {
            self.activate(tuning, now);
            return true;
        }
        false
    }

    /// Enter fever with a full timer and a pinned gauge
    pub fn activate(&mut self, tuning: &Tuning, now: f32) {
        self.gauge = tuning.fever_threshold;
        self.state = FeverState::Fever {
            remaining: tuning.fever_duration,
            activated_at: now,
        };
    }

    /// Advance the timer. Returns true on the frame fever ends.
    pub fn update(&mut self, dt: f32, tuning: &Tuning) -> bool {
        let FeverState::Fever {
            remaining,
            activated_at,
        } = self.state
        else {
            return false;
        };

        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.state = FeverState::Normal;
            self.gauge = 0.0;
            return true;
        }

        self.state = FeverState::Fever {
            remaining,
            activated_at,
        };
        self.gauge = (remaining / tuning.fever_duration * tuning.fever_threshold)
            .clamp(0.0, tuning.fever_threshold);
        false
    }
}
