//! Data-driven game balance
//!
//! Every number the simulation reads lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; hosts can override any subset from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning validation errors
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} must be positive")]
    NotPositive(&'static str),

    #[error("{0} must be within [0, 1]")]
    NotUnit(&'static str),

    #[error("max_tier must be within 1..=255, got {0}")]
    MaxTier(u32),

    #[error("inner_radius ({inner}) must be smaller than play_radius ({outer})")]
    InnerRadius { inner: f32, outer: f32 },

    #[error("spawn tier weights must be non-empty, non-zero and at most max_tier long")]
    SpawnWeights,
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub base_radius: f32,
    pub tier_scale_factor: f32,
    pub max_tier: u8,
    pub max_visible_tier: u32,

    pub play_radius: f32,
    pub inner_radius: f32,

    pub center_attraction: f32,
    pub attraction_reference: f32,
    pub max_attraction_boost: f32,
    pub distance_epsilon: f32,

    pub damping: f32,
    pub max_speed: f32,
    pub restitution: f32,
    pub connection_range: f32,

    pub session_length: f32,
    pub fever_threshold: f32,
    pub fever_duration: f32,
    pub removal_delay: f32,
    pub initial_population: usize,

    pub spawn_ring_fraction: f32,
    pub spawns_per_frame: u32,
    /// Relative weights for spawn tiers, index 0 = tier 1
    pub spawn_tier_weights: Vec<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_radius: BASE_RADIUS,
            tier_scale_factor: TIER_SCALE_FACTOR,
            max_tier: MAX_TIER,
            max_visible_tier: MAX_VISIBLE_TIER,

            play_radius: PLAY_RADIUS,
            inner_radius: INNER_RADIUS,

            center_attraction: CENTER_ATTRACTION,
            attraction_reference: ATTRACTION_REFERENCE,
            max_attraction_boost: MAX_ATTRACTION_BOOST,
            distance_epsilon: DISTANCE_EPSILON,

            damping: DAMPING,
            max_speed: MAX_SPEED,
            restitution: RESTITUTION,
            connection_range: CONNECTION_RANGE,

            session_length: SESSION_LENGTH,
            fever_threshold: FEVER_THRESHOLD,
            fever_duration: FEVER_DURATION,
            removal_delay: REMOVAL_DELAY,
            initial_population: INITIAL_POPULATION,

            spawn_ring_fraction: SPAWN_RING_FRACTION,
            spawns_per_frame: SPAWNS_PER_FRAME,
            spawn_tier_weights: SPAWN_TIER_WEIGHTS.to_vec(),
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("base_radius", self.base_radius),
            ("tier_scale_factor", self.tier_scale_factor),
            ("play_radius", self.play_radius),
            ("distance_epsilon", self.distance_epsilon),
            ("max_speed", self.max_speed),
            ("connection_range", self.connection_range),
            ("session_length", self.session_length),
            ("fever_threshold", self.fever_threshold),
            ("fever_duration", self.fever_duration),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive(name));
            }
        }
        if self.max_visible_tier == 0 {
            return Err(TuningError::NotPositive("max_visible_tier"));
        }
        if self.spawns_per_frame == 0 {
            return Err(TuningError::NotPositive("spawns_per_frame"));
        }
        if self.max_tier == 0 {
            return Err(TuningError::MaxTier(self.max_tier as u32));
        }

        let unit = [
            ("damping", self.damping),
            ("restitution", self.restitution),
            ("spawn_ring_fraction", self.spawn_ring_fraction),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::NotUnit(name));
            }
        }

        if self.inner_radius < 0.0 || self.inner_radius >= self.play_radius {
            return Err(TuningError::InnerRadius {
                inner: self.inner_radius,
                outer: self.play_radius,
            });
        }

        let weights = &self.spawn_tier_weights;
        if weights.is_empty()
            || weights.len() > self.max_tier as usize
            || weights.iter().all(|&w| w == 0)
        {
            return Err(TuningError::SpawnWeights);
        }

        Ok(())
    }

    /// Radius multiplier for a tier: `TIER_SCALE_FACTOR^(tier-1)`
    #[inline]
    pub fn tier_scale(&self, tier: u8) -> f32 {
        self.tier_scale_factor.powi(tier as i32 - 1)
    }

    /// Collision/visual radius for a tier
    #[inline]
    pub fn radius_for_tier(&self, tier: u8) -> f32 {
        self.base_radius * self.tier_scale(tier)
    }
}
