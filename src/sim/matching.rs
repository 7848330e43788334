//! Match resolution and the tier economy
//!
//! A released chain is scored, fed into the fever gauge, marked for removal
//! and paid back either as queued base spawns or as one merged puc plus spawns.
//! Points are computed in integer tenths so the floor never lands one short.

use glam::Vec2;
use rand::Rng;

use super::puc::{Puc, PucId};
use super::state::{GameEvent, SessionState};
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// What a resolved chain produced
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub length: usize,
    /// Sum of per-puc base values
    pub raw_points: f64,
    /// Points added to the score
    pub points: u64,
    /// Gauge added (zero during fever)
    pub gauge_gain: f32,
    pub fever_started: bool,
    /// Merged puc, if the chain merged instead of overflowing
    pub merged: Option<PucId>,
    /// Replacement spawns queued
    pub spawns: u32,
}

/// Per-puc base value in tenths of a point: `10 * (1 + 0.1*(tier-1))`
#[inline]
fn base_value_tenths(tier: u8) -> u64 {
    100 + 10 * (tier.max(1) as u64 - 1)
}

/// Per-puc base value
pub fn base_value(tier: u8) -> f64 {
    base_value_tenths(tier) as f64 / 10.0
}

/// Chain multiplier as a fraction (numerator, denominator)
fn chain_multiplier_ratio(length: usize) -> (u64, u64) {
    if length <= 1 {
        // Single taps are penalized
        (4, 5)
    } else {
        // 1 + 0.25*(L-1), capped at 2.0
        ((length as u64 + 3).min(8), 4)
    }
}

/// Chain multiplier: 0.8 for a single puc, `min(2, 1 + 0.25*(L-1))` otherwise
pub fn chain_multiplier(length: usize) -> f64 {
    let (num, den) = chain_multiplier_ratio(length);
    num as f64 / den as f64
}

/// `floor(rawPoints * chainMultiplier * feverMultiplier)`
pub fn chain_points(tiers: &[u8], fever_multiplier: u64) -> u64 {
    let raw_tenths: u64 = tiers.iter().map(|&t| base_value_tenths(t)).sum();
    let (num, den) = chain_multiplier_ratio(tiers.len());
    raw_tenths * num * fever_multiplier / (10 * den)
}

/// Gauge added by a chain outside fever
pub fn gauge_gain(length: usize, points: u64) -> f32 {
    if length <= 1 {
        0.5
    } else {
        (length as u64 + points / 2) as f32
    }
}

/// Score a released chain and dispose of its pucs.
///
/// Chain members that vanished or are already removing are skipped; an empty
/// chain is a no-op and returns `None`.
pub fn resolve(state: &mut SessionState, tuning: &Tuning, chain: &[PucId]) -> Option<MatchOutcome> {
    let mut members: Vec<PucId> = Vec::with_capacity(chain.len());
    for &id in chain {
        if members.contains(&id) {
            continue;
        }
        if state.pucs.get(id).is_some_and(|p| !p.is_removing()) {
            members.push(id);
        }
    }
    if members.is_empty() {
        return None;
    }

    let length = members.len();
    let mut tiers = Vec::with_capacity(length);
    let mut centroid = Vec2::ZERO;
    let mut species = None;
    for &id in &members {
        if let Some(puc) = state.pucs.get(id) {
            debug_assert!((1..=tuning.max_tier).contains(&puc.tier));
            tiers.push(puc.tier);
            centroid += puc.pos;
            if species.is_none() {
                species = Some(puc.species);
            }
        }
    }
    centroid /= length as f32;

    // --- SCORE ---
    let raw_points: f64 = tiers.iter().map(|&t| base_value(t)).sum();
    let points = chain_points(&tiers, state.fever.multiplier());
    state.score += points;

    // --- FEVER GAUGE ---
    let mut gain = 0.0;
    let mut fever_started = false;
    if !state.fever.is_active() {
        gain = gauge_gain(length, points);
        fever_started = state.fever.add_gauge(gain, tuning, state.elapsed);
        if fever_started {
            log::info!("Fever! ({}s)", tuning.fever_duration);
            state.events.push(GameEvent::FeverStarted);
        }
    }

    // --- DISPOSAL ---
    for &id in &members {
        if let Some(puc) = state.pucs.get_mut(id) {
            puc.begin_removal(tuning.removal_delay);
        }
    }

    // --- REPLACEMENT ---
    let mut merged = None;
    let mut merged_tier = None;
    let spawns = if length == 1 {
        1
    } else if points >= tuning.max_visible_tier as u64 {
        length as u32
    } else {
        let tier = points.clamp(1, tuning.max_tier as u64) as u8;
        let species = species.unwrap_or_else(|| state.random_species());
        merged = Some(state.pucs.insert(Puc::new(centroid, species, tier)));
        merged_tier = Some(tier);
        log::debug!("Merged {} pucs into tier {}", length, tier);
        length as u32 - 1
    };
    state.spawn_queue += spawns;

    log::debug!(
        "Chain of {}: {} points (raw {:.1}, x{:.2}), gauge +{:.1}",
        length,
        points,
        raw_points,
        chain_multiplier(length),
        gain
    );
    state.events.push(GameEvent::MatchResolved {
        length,
        points,
        merged_tier,
    });

    Some(MatchOutcome {
        length,
        raw_points,
        points,
        gauge_gain: gain,
        fever_started,
        merged,
        spawns,
    })
}

/// Drain up to `spawns_per_frame` queued spawns onto the spawn ring.
/// Returns how many pucs were placed.
pub fn materialize_spawns(state: &mut SessionState, tuning: &Tuning) -> u32 {
    let count = state.spawn_queue.min(tuning.spawns_per_frame);
    let ring = tuning.play_radius * tuning.spawn_ring_fraction;

    for _ in 0..count {
        let theta = state.rng.random_range(0.0..std::f32::consts::TAU);
        let tier = state.random_spawn_tier(tuning);
        let species = state.random_species();
        let id = state
            .pucs
            .insert(Puc::new(polar_to_cartesian(ring, theta), species, tier));
        log::trace!("Spawned {:?} tier {} at angle {:.2}", id, tier, theta);
    }

    state.spawn_queue -= count;
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::puc::Species;

    fn empty_state(tuning: &Tuning) -> SessionState {
        let mut tuning = tuning.clone();
        tuning.initial_population = 0;
        SessionState::new(&tuning, 42)
    }

    /// `n` pucs of one species in a row, 50 units apart
    fn row(state: &mut SessionState, n: usize, tier: u8) -> Vec<PucId> {
        (0..n)
            .map(|i| {
                state.pucs.insert(Puc::new(
                    Vec2::new(60.0 + 50.0 * i as f32, 0.0),
                    Species::Heart,
                    tier,
                ))
            })
            .collect()
    }

    #[test]
    fn test_chain_multiplier() {
        assert_eq!(chain_multiplier(1), 0.8);
        assert_eq!(chain_multiplier(2), 1.25);
        assert_eq!(chain_multiplier(3), 1.5);
        assert_eq!(chain_multiplier(5), 2.0);
        assert_eq!(chain_multiplier(12), 2.0);
    }

    #[test]
    fn test_base_value() {
        assert_eq!(base_value(1), 10.0);
        assert_eq!(base_value(2), 11.0);
        assert_eq!(base_value(20), 29.0);
    }

    #[test]
    fn test_multi_chain_overflows() {
        let tuning = Tuning::default();
        let mut state = empty_state(&tuning);
        let chain = row(&mut state, 5, 1);

        let outcome = resolve(&mut state, &tuning, &chain).expect("non-empty chain");
        assert_eq!(outcome.raw_points, 50.0);
        assert_eq!(outcome.points, 100);
        assert_eq!(state.score, 100);
        assert_eq!(outcome.spawns, 5);
        assert_eq!(state.spawn_queue, 5);
        assert!(outcome.merged.is_none());
        assert_eq!(outcome.gauge_gain, 55.0);
        assert_eq!(state.fever.gauge, 55.0);

        for id in chain {
            assert!(state.pucs.get(id).is_some_and(|p| p.is_removing() && !p.selected));
        }
        assert_eq!(state.pucs.active_count(), 0);
    }

    #[test]
    fn test_single_tap() {
        let tuning = Tuning::default();
        let mut state = empty_state(&tuning);
        let chain = row(&mut state, 1, 1);

        let outcome = resolve(&mut state, &tuning, &chain).expect("non-empty chain");
        assert_eq!(outcome.points, 8);
        assert_eq!(state.fever.gauge, 0.5);
        assert_eq!(outcome.spawns, 1);
        assert_eq!(state.spawn_queue, 1);
    }

    #[test]
    fn test_three_chain_overflows() {
        let tuning = Tuning::default();
        let mut state = empty_state(&tuning);
        let chain = row(&mut state, 3, 1);

        let outcome = resolve(&mut state, &tuning, &chain).expect("non-empty chain");
        assert_eq!(outcome.points, 45);
        assert_eq!(outcome.spawns, 3);
        assert!(outcome.merged.is_none());
    }

    #[test]
    fn test_low_points_merge() {
        let mut tuning = Tuning::default();
        tuning.max_visible_tier = 1000;
        let mut state = empty_state(&tuning);
        let chain = row(&mut state, 2, 1);

        let outcome = resolve(&mut state, &tuning, &chain).expect("non-empty chain");
        // 20 raw * 1.25 = 25 points, below the threshold: merge
        assert_eq!(outcome.points, 25);
        assert_eq!(outcome.spawns, 1);
        assert_eq!(state.spawn_queue, 1);

        let merged = outcome.merged.and_then(|id| state.pucs.get(id)).expect("merged puc");
        assert_eq!(merged.tier, tuning.max_tier); // min(25, 20)
        assert_eq!(merged.species, Species::Heart);
        assert!((merged.pos - Vec2::new(85.0, 0.0)).length() < 1e-4);
        assert!(!merged.is_removing());
    }

    #[test]
    fn test_merge_tier_below_cap() {
        let mut tuning = Tuning::default();
        tuning.max_visible_tier = 1000;
        tuning.max_tier = 50;
        tuning.spawn_tier_weights = vec![1];
        let mut state = empty_state(&tuning);
        let chain = row(&mut state, 2, 1);

        let outcome = resolve(&mut state, &tuning, &chain).expect("non-empty chain");
        let merged = outcome.merged.and_then(|id| state.pucs.get(id)).expect("merged puc");
        assert_eq!(merged.tier, 25);
    }

    #[test]
    fn test_fever_doubles_and_freezes_gauge() {
        let tuning = Tuning::default();
        let mut state = empty_state(&tuning);
        state.fever.activate(&tuning, 0.0);
        let chain = row(&mut state, 5, 1);

        let outcome = resolve(&mut state, &tuning, &chain).expect("non-empty chain");
        assert_eq!(outcome.points, 200);
        assert_eq!(outcome.gauge_gain, 0.0);
        assert_eq!(state.fever.gauge, tuning.fever_threshold);
    }

    #[test]
    fn test_gauge_fill_starts_fever() {
        let tuning = Tuning::default();
        let mut state = empty_state(&tuning);
        let first = row(&mut state, 5, 1);
        resolve(&mut state, &tuning, &first);
        assert!(!state.fever.is_active());

        let second = row(&mut state, 5, 1);
        let outcome = resolve(&mut state, &tuning, &second).expect("non-empty chain");
        assert!(outcome.fever_started);
        assert!(state.fever.is_active());
        assert_eq!(state.fever.gauge, tuning.fever_threshold);
        assert!(state.events.contains(&GameEvent::FeverStarted));
    }

    #[test]
    fn test_empty_and_stale_chains_are_noops() {
        let tuning = Tuning::default();
        let mut state = empty_state(&tuning);
        assert!(resolve(&mut state, &tuning, &[]).is_none());

        let chain = row(&mut state, 2, 1);
        resolve(&mut state, &tuning, &chain);
        let score = state.score;
        let queue = state.spawn_queue;

        // Same pucs again: already removing
        assert!(resolve(&mut state, &tuning, &chain).is_none());
        assert_eq!(state.score, score);
        assert_eq!(state.spawn_queue, queue);
    }

    #[test]
    fn test_materialize_spawns_on_ring() {
        let tuning = Tuning::default();
        let mut state = empty_state(&tuning);
        state.spawn_queue = 3;

        assert_eq!(materialize_spawns(&mut state, &tuning), 1);
        assert_eq!(state.spawn_queue, 2);
        assert_eq!(state.pucs.len(), 1);

        let ring = tuning.play_radius * tuning.spawn_ring_fraction;
        for (_, puc) in state.pucs.iter() {
            assert!((puc.pos.length() - ring).abs() < 1e-2);
            assert!((1..=5).contains(&puc.tier));
        }

        materialize_spawns(&mut state, &tuning);
        materialize_spawns(&mut state, &tuning);
        assert_eq!(materialize_spawns(&mut state, &tuning), 0);
        assert_eq!(state.pucs.len(), 3);
    }
}
