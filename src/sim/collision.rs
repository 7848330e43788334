//! Contact detection for circular pucs
//!
//! Pucs are circles; the arena is an annulus between the central exclusion
//! disk and the outer play radius. All tests return a [`CollisionResult`]
//! whose normal points the way the puc must be pushed.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact normal, unit length when hit
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two circles.
///
/// The normal points from `a` toward `b`. Coincident centers fall back to +X
/// so the pair still separates.
pub fn circle_circle_collision(
    a_pos: Vec2,
    b_pos: Vec2,
    contact_distance: f32,
    epsilon: f32,
) -> CollisionResult {
    let delta = b_pos - a_pos;
    let dist = delta.length();
    if dist >= contact_distance {
        return CollisionResult::miss();
    }

    let normal = if dist > epsilon { delta / dist } else { Vec2::X };
    CollisionResult {
        hit: true,
        normal,
        penetration: contact_distance - dist,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check collision with the outer arena wall
pub fn outer_wall_collision(pos: Vec2, radius: f32, arena_radius: f32) -> CollisionResult {
    let r = pos.length();

    if r + radius > arena_radius {
        let normal = if r > 0.0 { -pos / r } else { -Vec2::X }; // Point inward
        return CollisionResult {
            hit: true,
            normal,
            penetration: r + radius - arena_radius,
        };
    }

    CollisionResult::miss()
}

/// Check collision with the central exclusion disk
pub fn inner_disk_collision(
    pos: Vec2,
    radius: f32,
    disk_radius: f32,
    epsilon: f32,
) -> CollisionResult {
    let r = pos.length();

    if r < disk_radius + radius {
        let normal = if r > epsilon { pos / r } else { Vec2::X }; // Point outward
        return CollisionResult {
            hit: true,
            normal,
            penetration: disk_radius + radius - r,
        };
    }

    CollisionResult::miss()
}
