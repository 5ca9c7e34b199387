//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed update order
//! - Seeded RNG only
//! - Stable iteration order (players by index, ghosts by name order)
//! - No rendering, audio or storage dependencies

pub mod ghost;
pub mod kinematics;
pub mod maze;
pub mod player;
pub mod state;
pub mod tick;

pub use ghost::{Ghost, GhostMode, GhostName, Overlay};
pub use kinematics::{Body, Direction};
pub use maze::{CLASSIC_LAYOUT, Maze, MazeError, Tile};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Control, TickInput, tick};
