//! Idle/demo mode - a bot that plays the game
//!
//! Looks for the longest chain it can trace greedily and plays it through the
//! same pointer events a human would send.

use glam::Vec2;

use crate::sim::selection::{hit_test, is_adjacent};
use crate::sim::{MatchOutcome, PucId, Session};

/// Seconds between moves by default
pub const DEFAULT_THINK_TIME: f32 = 0.75;

/// Trace the longest greedy chain on the board.
///
/// From every live puc, repeatedly step to the nearest legal neighbor not yet
/// in the path. Only paths whose every point hit-tests to the intended puc are
/// kept, so replaying them through the pointer events reproduces the chain.
pub fn find_best_chain(session: &Session) -> Option<Vec<Vec2>> {
    let state = session.state();
    let tuning = session.tuning();
    let live: Vec<_> = state.pucs.iter_active().collect();

    let mut best: Vec<PucId> = Vec::new();
    for &(start_id, _) in &live {
        let mut path = vec![start_id];
        let mut current = start_id;

        loop {
            let Some(cur) = state.pucs.get(current) else {
                break;
            };
            let next = live
                .iter()
                .filter(|(id, p)| !path.contains(id) && is_adjacent(cur, p, tuning))
                .filter(|(id, p)| hit_test(&state.pucs, tuning, p.pos) == Some(*id))
                .min_by(|a, b| {
                    a.1.pos
                        .distance_squared(cur.pos)
                        .partial_cmp(&b.1.pos.distance_squared(cur.pos))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            match next {
                Some(&(id, _)) => {
                    path.push(id);
                    current = id;
                }
                None => break,
            }
        }

        let start_hits = state
            .pucs
            .get(start_id)
            .is_some_and(|p| hit_test(&state.pucs, tuning, p.pos) == Some(start_id));
        if start_hits && path.len() > best.len() {
            best = path;
        }
    }

    if best.is_empty() {
        return None;
    }
    Some(
        best.iter()
            .filter_map(|&id| state.pucs.get(id).map(|p| p.pos))
            .collect(),
    )
}

/// Feed press/move/release for a traced chain
pub fn play_chain(session: &mut Session, points: &[Vec2]) -> Option<MatchOutcome> {
    let (first, rest) = points.split_first()?;
    session.press_at(first.x, first.y);
    for p in rest {
        session.move_at(p.x, p.y);
    }
    let last = rest.last().unwrap_or(first);
    session.release_at(last.x, last.y)
}

/// Plays one chain every `think_time` seconds
#[derive(Debug, Clone)]
pub struct Autoplayer {
    pub think_time: f32,
    cooldown: f32,
}

impl Default for Autoplayer {
    fn default() -> Self {
        Self::new(DEFAULT_THINK_TIME)
    }
}

impl Autoplayer {
    pub fn new(think_time: f32) -> Self {
        Self {
            think_time,
            cooldown: think_time,
        }
    }

    /// Call once per frame between ticks. Returns the outcome when a chain was played.
    pub fn update(&mut self, session: &mut Session, dt: f32) -> Option<MatchOutcome> {
        if session.state().is_over() {
            return None;
        }
        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return None;
        }
        self.cooldown = self.think_time;

        let chain = find_best_chain(session)?;
        play_chain(session, &chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_a_chain_on_fresh_board() {
        let session = Session::new(31337);
        let chain = find_best_chain(&session).expect("a populated board has a chain");
        assert!(!chain.is_empty());
    }

    #[test]
    fn test_played_chain_scores() {
        let mut session = Session::new(31337);
        let chain = find_best_chain(&session).expect("a populated board has a chain");

        let outcome = play_chain(&mut session, &chain).expect("chain resolves");
        assert_eq!(outcome.length, chain.len());
        assert!(session.state().score > 0);
    }

    #[test]
    fn test_autoplayer_waits_for_think_time() {
        let mut session = Session::new(5);
        let mut bot = Autoplayer::new(0.5);

        assert!(bot.update(&mut session, 0.25).is_none());
        assert!(bot.update(&mut session, 0.25).is_some());
        assert!(session.state().score > 0);
    }

    #[test]
    fn test_empty_board_has_no_chain() {
        let tuning = crate::Tuning {
            initial_population: 0,
            ..crate::Tuning::default()
        };
        let session = Session::with_tuning(tuning, 1).expect("valid tuning");
        assert!(find_best_chain(&session).is_none());
    }
}
