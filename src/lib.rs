//! Puc Rush - A chain-matching arcade game in a circular gravity well
//!
//! Core modules:
//! - `sim`: Simulation core (physics, selection, matching, fever, session clock)
//! - `tuning`: Data-driven game balance
//! - `autoplay`: Demo player that finds and plays legal chains
//! - `highscores`: In-memory leaderboard
//! - `web`: wasm-bindgen surface for a browser host

pub mod autoplay;
pub mod highscores;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use sim::{GameEvent, Phase, Session, Snapshot};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
///
/// These are the defaults behind [`Tuning`]; the simulation reads the live
/// values from the session's tuning, never from here directly.
pub mod consts {
    /// Reference frame rate that per-frame damping is expressed against
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest physics step taken from one host frame (seconds)
    pub const MAX_PHYSICS_DT: f32 = 0.1;

    /// Piece geometry
    pub const BASE_RADIUS: f32 = 24.0;
    pub const TIER_SCALE_FACTOR: f32 = 1.08;
    pub const MAX_TIER: u8 = 20;
    /// Points threshold separating merge from overflow
    pub const MAX_VISIBLE_TIER: u32 = 10;

    /// Arena dimensions (centered on the origin)
    pub const PLAY_RADIUS: f32 = 288.0;
    pub const INNER_RADIUS: f32 = 32.0;

    /// Gravity well (acceleration toward center, units/s²)
    pub const CENTER_ATTRACTION: f32 = 240.0;
    /// Distance at which the inverse-distance boost equals 1
    pub const ATTRACTION_REFERENCE: f32 = 150.0;
    pub const MAX_ATTRACTION_BOOST: f32 = 4.0;
    pub const DISTANCE_EPSILON: f32 = 1.0e-3;

    /// Motion
    pub const DAMPING: f32 = 0.98;
    pub const MAX_SPEED: f32 = 600.0;
    pub const RESTITUTION: f32 = 0.5;

    /// Chain adjacency, in multiples of BASE_RADIUS
    pub const CONNECTION_RANGE: f32 = 3.0;

    /// Session
    pub const SESSION_LENGTH: f32 = 60.0;
    pub const FEVER_THRESHOLD: f32 = 100.0;
    pub const FEVER_DURATION: f32 = 8.0;
    pub const REMOVAL_DELAY: f32 = 0.3;
    pub const INITIAL_POPULATION: usize = 48;

    /// Replacement spawns land on a ring at this fraction of the play radius
    pub const SPAWN_RING_FRACTION: f32 = 0.8;
    pub const SPAWNS_PER_FRAME: u32 = 1;
    /// Spawn weights for tiers 1..=5
    pub const SPAWN_TIER_WEIGHTS: [u32; 5] = [40, 30, 15, 10, 5];
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
