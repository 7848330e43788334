//! Wall-clock driven session tick
//!
//! The host calls [`Session::tick`] once per display refresh with its frame
//! timestamp and forwards pointer events in between. Each tick runs, in order:
//! clock, fever timer, removal windows, physics, spawn drain.

use glam::Vec2;

use super::matching::{self, MatchOutcome};
use super::physics;
use super::selection;
use super::snapshot::Snapshot;
use super::state::{GameEvent, Phase, SessionState};
use crate::consts::MAX_PHYSICS_DT;
use crate::tuning::{Tuning, TuningError};

/// A running game: state, tuning, host clock and the published snapshot
#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    state: SessionState,
    /// Host timestamp (ms) of the previous tick; `None` until the first one
    last_now: Option<f64>,
    snapshot: Snapshot,
}

impl Session {
    /// New session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    /// New session with custom tuning
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        let state = SessionState::new(&tuning, seed);
        let snapshot = Snapshot::capture(&state, &tuning);
        log::info!(
            "Session started with seed {} ({} pucs)",
            seed,
            state.pucs.len()
        );
        Self {
            tuning,
            state,
            last_now: None,
            snapshot,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Take every pending notification
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Advance by the wall-clock time since the previous call.
    /// The first call after construction or restart only sets the baseline.
    pub fn tick(&mut self, now_ms: f64) {
        let dt = match self.last_now {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_now = Some(now_ms);
        self.advance(dt);
    }

    /// Advance the session by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        // Don't tick once the clock has run out
        if self.state.is_over() {
            return;
        }
        let dt = dt.max(0.0);
        let tuning = &self.tuning;
        let state = &mut self.state;

        // --- CLOCK ---
        state.elapsed += dt;
        state.time_left = (state.time_left - dt).max(0.0);
        if state.time_left <= 0.0 {
            self.end_session();
            return;
        }

        // --- FEVER ---
        if state.fever.update(dt, tuning) {
            log::info!("Fever over");
            state.events.push(GameEvent::FeverEnded);
        }

        // --- REMOVALS ---
        state.pucs.advance_removals(dt);

        // --- PHYSICS ---
        physics::step(&mut state.pucs, tuning, dt.min(MAX_PHYSICS_DT));

        // --- SPAWNS ---
        matching::materialize_spawns(state, tuning);

        self.publish();
    }

    /// Pointer down at a simulation-space point
    pub fn press_at(&mut self, x: f32, y: f32) {
        selection::press(&mut self.state, &self.tuning, Vec2::new(x, y));
        self.publish();
    }

    /// Pointer move at a simulation-space point
    pub fn move_at(&mut self, x: f32, y: f32) {
        selection::drag(&mut self.state, &self.tuning, Vec2::new(x, y));
        self.publish();
    }

    /// Pointer up; resolves the chain if there is one.
    /// The release point itself does not affect the chain.
    pub fn release_at(&mut self, _x: f32, _y: f32) -> Option<MatchOutcome> {
        let chain = selection::release(&mut self.state);
        let outcome = matching::resolve(&mut self.state, &self.tuning, &chain);
        self.publish();
        outcome
    }

    /// Start over with a seed drawn from this session
    pub fn restart(&mut self) {
        let seed = self.state.next_seed();
        self.restart_with_seed(seed);
    }

    /// Start over with an explicit seed. Replaces all state, which drops any
    /// pending removals and queued spawns from the old session.
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.state = SessionState::new(&self.tuning, seed);
        self.last_now = None;
        log::info!("Session restarted with seed {}", seed);
        self.publish();
    }

    fn end_session(&mut self) {
        let state = &mut self.state;
        selection::clear_selection(state);
        state.time_left = 0.0;
        state.phase = Phase::Over;
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
        log::info!("Game over: final score {}", state.score);
        self.publish();
    }

    fn publish(&mut self) {
        self.snapshot = Snapshot::capture(&self.state, &self.tuning);
    }
}
