//! Property tests over random input/tick sequences

use proptest::prelude::*;
use puc_rush::{Phase, Session};

#[derive(Debug, Clone)]
enum Op {
    Tick(f64),
    Press(f32, f32),
    Move(f32, f32),
    Release,
}

fn coord() -> impl Strategy<Value = f32> {
    -300.0f32..300.0
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0.0f64..120.0).prop_map(Op::Tick),
        1 => (coord(), coord()).prop_map(|(x, y)| Op::Press(x, y)),
        3 => (coord(), coord()).prop_map(|(x, y)| Op::Move(x, y)),
        1 => Just(Op::Release),
    ]
}

fn apply(session: &mut Session, now: &mut f64, op: &Op) {
    match *op {
        Op::Tick(dt) => {
            *now += dt;
            session.tick(*now);
        }
        Op::Press(x, y) => session.press_at(x, y),
        Op::Move(x, y) => session.move_at(x, y),
        Op::Release => {
            session.release_at(0.0, 0.0);
        }
    }
}

/// Press on each live puc's center and sweep over its neighbors
fn sweep_ops(session: &Session) -> Vec<Op> {
    let mut ops = Vec::new();
    for (_, puc) in session.state().pucs.iter_active().take(8) {
        ops.push(Op::Press(puc.pos.x, puc.pos.y));
        for (_, other) in session.state().pucs.iter_active() {
            if other.pos.distance(puc.pos) < 90.0 {
                ops.push(Op::Move(other.pos.x, other.pos.y));
            }
        }
        ops.push(Op::Release);
        ops.push(Op::Tick(16.0));
    }
    ops
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn bounds_hold_and_score_never_drops(
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 1..200),
    ) {
        let mut session = Session::new(seed);
        let threshold = session.tuning().fever_threshold;
        let max_tier = session.tuning().max_tier;
        let mut now = 0.0;
        session.tick(now);

        let mut last_score = 0;
        let mut scripted = sweep_ops(&session);
        scripted.extend(ops);

        for op in &scripted {
            apply(&mut session, &mut now, op);
            let state = session.state();

            prop_assert!(state.score >= last_score);
            last_score = state.score;

            prop_assert!(state.fever.gauge >= 0.0 && state.fever.gauge <= threshold);
            prop_assert!(state.time_left >= 0.0);
            prop_assert_eq!(state.phase == Phase::Over, state.time_left == 0.0);
            for (_, puc) in state.pucs.iter() {
                prop_assert!(puc.tier >= 1 && puc.tier <= max_tier);
            }
        }
    }

    #[test]
    fn chains_stay_legal(
        seed in any::<u64>(),
        moves in prop::collection::vec((coord(), coord()), 1..80),
    ) {
        let mut session = Session::new(seed);
        session.tick(0.0);

        let start = session
            .state()
            .pucs
            .iter_active()
            .next()
            .map(|(_, p)| p.pos);
        prop_assume!(start.is_some());
        let start = start.unwrap_or_default();
        session.press_at(start.x, start.y);

        // Mix random points with neighbor centers so chains actually grow
        let centers: Vec<_> = session.state().pucs.iter_active().map(|(_, p)| p.pos).collect();
        for (i, &(x, y)) in moves.iter().enumerate() {
            if i % 2 == 0 {
                session.move_at(x, y);
            } else {
                let c = centers[i % centers.len()];
                session.move_at(c.x, c.y);
            }

            let state = session.state();
            let chain: Vec<_> = state
                .chain
                .iter()
                .filter_map(|&id| state.pucs.get(id))
                .collect();
            prop_assert_eq!(chain.len(), state.chain.len());
            for puc in &chain {
                prop_assert_eq!(puc.species, chain[0].species);
                prop_assert!(puc.selected && !puc.is_removing());
            }
            for (i, id) in state.chain.iter().enumerate() {
                prop_assert!(!state.chain[i + 1..].contains(id));
            }
        }
    }

    #[test]
    fn matches_conserve_population(seed in any::<u64>(), pick in 0usize..48) {
        let mut session = Session::new(seed);
        session.tick(0.0);
        let before = session.state().pucs.active_count();

        let target = session
            .state()
            .pucs
            .iter_active()
            .nth(pick % before)
            .map(|(_, p)| p.pos)
            .unwrap_or_default();
        session.press_at(target.x, target.y);
        let points: Vec<_> = session.state().pucs.iter_active().map(|(_, p)| p.pos).collect();
        for p in points {
            session.move_at(p.x, p.y);
        }
        session.release_at(target.x, target.y);

        // One spawn per frame; a second is plenty for any chain on this board
        let mut now = 0.0;
        for _ in 0..90 {
            now += 1000.0 / 60.0;
            session.tick(now);
        }

        prop_assert_eq!(session.state().spawn_queue, 0);
        prop_assert_eq!(session.state().pucs.active_count(), before);
        prop_assert_eq!(session.state().pucs.len(), before);
    }
}
