//! Simulation core
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Single-threaded, driven by the host's frame clock
//! - Seeded RNG only
//! - Stable iteration order (by registry slot)
//! - Hosts read [`Snapshot`]s; they never mutate state directly

pub mod collision;
pub mod fever;
pub mod matching;
pub mod physics;
pub mod puc;
pub mod selection;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circle_circle_collision, reflect_velocity};
pub use fever::{Fever, FeverState};
pub use matching::MatchOutcome;
pub use puc::{Puc, PucId, PucRegistry, Species};
pub use snapshot::{PreviewSegment, PucView, Snapshot};
pub use state::{GameEvent, Phase, SessionState};
pub use tick::Session;
