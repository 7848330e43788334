//! Puc Rush entry point
//!
//! The browser build is driven through `puc_rush::web`. Natively this runs a
//! headless demo session: the autoplayer plays one full round on a simulated
//! 60 Hz clock and the result is logged.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use puc_rush::autoplay::Autoplayer;
    use puc_rush::{GameEvent, HighScores, Session};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    log::info!("Puc Rush (native) starting...");

    let mut session = Session::new(seed);
    let mut bot = Autoplayer::default();
    let mut high_scores = HighScores::new();

    let frame_ms = 1000.0 / 60.0;
    let frame_secs = (frame_ms / 1000.0) as f32;
    let mut now = 0.0;
    let mut chains = 0u32;
    let mut finished = false;

    session.tick(now);
    while !finished {
        now += frame_ms;
        session.tick(now);

        for event in session.drain_events() {
            match event {
                GameEvent::MatchResolved {
                    length,
                    points,
                    merged_tier,
                } => {
                    chains += 1;
                    log::debug!("chain {length} -> {points} pts (merged: {merged_tier:?})");
                }
                GameEvent::FeverStarted => log::info!("FEVER at {:.1}s", now / 1000.0),
                GameEvent::FeverEnded => log::info!("Fever ended at {:.1}s", now / 1000.0),
                GameEvent::GameOver { final_score } => {
                    high_scores.add_score(final_score, now);
                    finished = true;
                }
            }
        }

        bot.update(&mut session, frame_secs);
    }

    let snapshot = session.snapshot();
    println!(
        "Seed {seed}: {} points from {chains} chains, {} pucs on the board",
        snapshot.score,
        snapshot.pucs.len()
    );
    if let Some(top) = high_scores.top_score() {
        println!("Best this run: {top}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is puc_rush::web, this is just to satisfy the compiler
}
