//! Gravity-well integrator and overlap relaxation
//!
//! One step per host frame, no sub-stepping. The collision pass is a single
//! relaxation sweep: densely packed pucs shed residual overlap over several
//! frames rather than all at once.

use glam::Vec2;

use super::collision::{
    circle_circle_collision, inner_disk_collision, outer_wall_collision, reflect_velocity,
};
use super::puc::{Puc, PucId, PucRegistry};
use crate::consts::REFERENCE_FPS;
use crate::tuning::Tuning;

/// Advance every non-removing puc by `dt` seconds
pub fn step(pucs: &mut PucRegistry, tuning: &Tuning, dt: f32) {
    if dt <= 0.0 {
        return;
    }

    let ids = pucs.active_ids();
    for &id in &ids {
        if let Some(puc) = pucs.get_mut(id) {
            integrate(puc, tuning, dt);
        }
    }

    resolve_collisions(pucs, &ids, tuning);

    for &id in &ids {
        if let Some(puc) = pucs.get_mut(id) {
            constrain_to_arena(puc, tuning);
        }
    }
}

/// Pull toward the center, damp, clamp speed, then move
pub fn integrate(puc: &mut Puc, tuning: &Tuning, dt: f32) {
    // --- GRAVITY WELL ---
    // Inverse distance scaling: stronger near the center, capped
    let dist = puc.pos.length().max(tuning.distance_epsilon);
    let to_center = -puc.pos / dist;
    let boost = (tuning.attraction_reference / dist).min(tuning.max_attraction_boost);
    puc.vel += to_center * tuning.center_attraction * boost * dt;

    // Damping is specified per 60 Hz frame
    puc.vel *= tuning.damping.powf(dt * REFERENCE_FPS);
    puc.vel = puc.vel.clamp_length_max(tuning.max_speed);

    puc.pos += puc.vel * dt;
}

/// Single O(n²) pass over `ids` in order, i < j. Returns the number of contacts.
pub fn resolve_collisions(pucs: &mut PucRegistry, ids: &[PucId], tuning: &Tuning) -> usize {
    let mut contacts = 0;

    for (i, &a_id) in ids.iter().enumerate() {
        for &b_id in &ids[i + 1..] {
            let Some((a, b)) = pucs.get_pair_mut(a_id, b_id) else {
                continue;
            };

            let scale_a = tuning.tier_scale(a.tier);
            let scale_b = tuning.tier_scale(b.tier);
            let contact_distance = tuning.base_radius * 2.0 * (scale_a + scale_b) * 0.5;

            let hit = circle_circle_collision(a.pos, b.pos, contact_distance, tuning.distance_epsilon);
            if !hit.hit {
                continue;
            }
            contacts += 1;

            // The larger piece takes the smaller share of both corrections
            let total = scale_a + scale_b;
            let share_a = scale_b / total;
            let share_b = scale_a / total;

            a.pos -= hit.normal * hit.penetration * share_a;
            b.pos += hit.normal * hit.penetration * share_b;

            let closing = (b.vel - a.vel).dot(hit.normal);
            if closing < 0.0 {
                let impulse = -(1.0 + tuning.restitution) * closing;
                a.vel -= hit.normal * impulse * share_a;
                b.vel += hit.normal * impulse * share_b;
            }
        }
    }

    contacts
}

/// Keep a puc inside the annulus, bouncing it off either boundary
pub fn constrain_to_arena(puc: &mut Puc, tuning: &Tuning) {
    let radius = tuning.radius_for_tier(puc.tier);

    let outer = outer_wall_collision(puc.pos, radius, tuning.play_radius);
    if outer.hit {
        puc.pos += outer.normal * outer.penetration;
        puc.vel = bounce(puc.vel, outer.normal, tuning.restitution);
    }

    let inner = inner_disk_collision(
        puc.pos,
        radius,
        tuning.inner_radius,
        tuning.distance_epsilon,
    );
    if inner.hit {
        puc.pos += inner.normal * inner.penetration;
        puc.vel = bounce(puc.vel, inner.normal, tuning.restitution);
    }
}

/// Reflect and damp, but only when moving into the surface
fn bounce(vel: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    if vel.dot(normal) < 0.0 {
        reflect_velocity(vel, normal) * restitution
    } else {
        vel
    }
}
