//! Pointer-driven chain selection
//!
//! `Idle --press on a puc--> Chaining --release--> Idle`. While chaining,
//! moving over an unselected puc of the chain's species that sits close
//! enough to the chain's last member appends it.

use glam::Vec2;

use super::puc::{Puc, PucId, PucRegistry};
use super::state::{Phase, SessionState};
use crate::tuning::Tuning;

/// First non-removing puc (slot order, not nearest) whose radius contains `point`
pub fn hit_test(pucs: &PucRegistry, tuning: &Tuning, point: Vec2) -> Option<PucId> {
    pucs.iter_active()
        .find(|(_, puc)| puc.pos.distance(point) <= tuning.radius_for_tier(puc.tier))
        .map(|(id, _)| id)
}

/// Whether `b` may follow `a` in a chain
pub fn is_adjacent(a: &Puc, b: &Puc, tuning: &Tuning) -> bool {
    let avg_scale = (tuning.tier_scale(a.tier) + tuning.tier_scale(b.tier)) * 0.5;
    a.species == b.species
        && a.pos.distance(b.pos) <= tuning.base_radius * tuning.connection_range * avg_scale
}

/// Pointer down: start a new chain on the hit puc
pub fn press(state: &mut SessionState, tuning: &Tuning, point: Vec2) {
    if state.is_over() {
        return;
    }
    let Some(id) = hit_test(&state.pucs, tuning, point) else {
        return;
    };

    clear_selection(state);
    if let Some(puc) = state.pucs.get_mut(id) {
        puc.selected = true;
    }
    state.chain.push(id);
    state.pointer = Some(point);
    state.phase = Phase::Chaining;
}

/// Pointer move: extend the chain if the hit puc is a legal next link.
/// Returns true if a puc was appended.
pub fn drag(state: &mut SessionState, tuning: &Tuning, point: Vec2) -> bool {
    if state.phase != Phase::Chaining {
        return false;
    }
    state.pointer = Some(point);

    let Some(last_id) = state.chain.last().copied() else {
        return false;
    };
    let Some(hit_id) = hit_test(&state.pucs, tuning, point) else {
        return false;
    };
    if hit_id == last_id || state.chain.contains(&hit_id) {
        return false;
    }

    let (Some(last), Some(hit)) = (state.pucs.get(last_id), state.pucs.get(hit_id)) else {
        return false;
    };
    if hit.selected || hit.is_removing() || !is_adjacent(last, hit, tuning) {
        return false;
    }

    if let Some(puc) = state.pucs.get_mut(hit_id) {
        puc.selected = true;
    }
    state.chain.push(hit_id);
    true
}

/// Pointer up: hand back the finished chain (possibly empty) and return to idle.
/// Releasing while idle is a no-op.
pub fn release(state: &mut SessionState) -> Vec<PucId> {
    if state.phase != Phase::Chaining {
        return Vec::new();
    }
    let chain = state.chain.clone();
    clear_selection(state);
    state.phase = Phase::Idle;
    chain
}

/// Deselect every chain member and forget the pointer
pub fn clear_selection(state: &mut SessionState) {
    for id in state.chain.drain(..) {
        if let Some(puc) = state.pucs.get_mut(id) {
            puc.selected = false;
        }
    }
    state.pointer = None;
}

/// Segment from the chain's last member to the pointer, for drawing only
pub fn preview_segment(state: &SessionState) -> Option<(Vec2, Vec2)> {
    if state.phase != Phase::Chaining {
        return None;
    }
    let last = state.chain.last().and_then(|&id| state.pucs.get(id))?;
    Some((last.pos, state.pointer?))
}
