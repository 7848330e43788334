//! Session state and core simulation types
//!
//! Everything a session owns lives in one [`SessionState`] value, replaced
//! wholesale on restart.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fever::Fever;
use super::puc::{Puc, PucId, PucRegistry, Species};
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a press
    Idle,
    /// Pointer down, chain being built
    Chaining,
    /// Clock ran out
    Over,
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A chain was scored
    MatchResolved {
        length: usize,
        points: u64,
        merged_tier: Option<u8>,
    },
    FeverStarted,
    FeverEnded,
    /// Fired exactly once per session
    GameOver { final_score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Seed this session was started with
    pub seed: u64,
    pub score: u64,
    /// Seconds until game over
    pub time_left: f32,
    /// Seconds of simulation advanced so far
    pub elapsed: f32,
    pub fever: Fever,
    /// Selected pucs in selection order
    pub chain: Vec<PucId>,
    /// Last pointer position while chaining (preview only)
    pub pointer: Option<Vec2>,
    /// Replacement pucs owed to the registry
    pub spawn_queue: u32,
    pub phase: Phase,
    pub pucs: PucRegistry,
    /// Pending host notifications
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl SessionState {
    /// Fresh session with the initial population scattered over the arena
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let mut state = Self {
            seed,
            score: 0,
            time_left: tuning.session_length,
            elapsed: 0.0,
            fever: Fever::default(),
            chain: Vec::new(),
            pointer: None,
            spawn_queue: 0,
            phase: Phase::Idle,
            pucs: PucRegistry::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };

        state.populate(tuning);
        state
    }

    /// Scatter the starting tier-1 pucs between the inner disk and the wall
    fn populate(&mut self, tuning: &Tuning) {
        let min_r = tuning.inner_radius + tuning.base_radius;
        let max_r = (tuning.play_radius - tuning.base_radius).max(min_r);

        for _ in 0..tuning.initial_population {
            // sqrt keeps the areal density uniform
            let t: f32 = self.rng.random();
            let r = min_r + (max_r - min_r) * t.sqrt();
            let theta = self.rng.random_range(0.0..std::f32::consts::TAU);
            let species = self.random_species();
            self.pucs
                .insert(Puc::new(polar_to_cartesian(r, theta), species, 1));
        }
    }

    pub fn random_species(&mut self) -> Species {
        Species::ALL[self.rng.random_range(0..Species::COUNT)]
    }

    /// Draw a spawn tier from the weight table (index 0 = tier 1)
    pub fn random_spawn_tier(&mut self, tuning: &Tuning) -> u8 {
        let weights = &tuning.spawn_tier_weights;
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return 1;
        }

        let mut roll = self.rng.random_range(0..total);
        for (i, &weight) in weights.iter().enumerate() {
            if roll < weight {
                return (i as u8 + 1).min(tuning.max_tier);
            }
            roll -= weight;
        }
        1
    }

    /// Seed for the next session, drawn from this one's RNG
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }
}
