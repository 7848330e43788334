//! Read-only view of a session for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::puc::{PucId, Species};
use super::selection::preview_segment;
use super::state::{Phase, SessionState};
use crate::tuning::Tuning;

/// One puc as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PucView {
    pub id: PucId,
    pub pos: Vec2,
    pub radius: f32,
    pub species: Species,
    pub tier: u8,
    pub selected: bool,
    pub removing: bool,
}

/// Line from the chain's last member to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewSegment {
    pub from: Vec2,
    pub to: Vec2,
}

/// Immutable session snapshot, rebuilt by the session after every change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub pucs: Vec<PucView>,
    pub score: u64,
    pub time_left: f32,
    pub fever_active: bool,
    pub fever_gauge: f32,
    pub fever_remaining: f32,
    pub phase: Phase,
    pub chain: Vec<PucId>,
    pub preview: Option<PreviewSegment>,
}

impl Snapshot {
    pub fn capture(state: &SessionState, tuning: &Tuning) -> Self {
        let pucs = state
            .pucs
            .iter()
            .map(|(id, puc)| PucView {
                id,
                pos: puc.pos,
                radius: tuning.radius_for_tier(puc.tier),
                species: puc.species,
                tier: puc.tier,
                selected: puc.selected,
                removing: puc.is_removing(),
            })
            .collect();

        Self {
            pucs,
            score: state.score,
            time_left: state.time_left,
            fever_active: state.fever.is_active(),
            fever_gauge: state.fever.gauge,
            fever_remaining: state.fever.remaining(),
            phase: state.phase,
            chain: state.chain.clone(),
            preview: preview_segment(state).map(|(from, to)| PreviewSegment { from, to }),
        }
    }

    /// JSON for hosts that cross a language boundary
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
