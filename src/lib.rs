//! Maze Chase - a two-player cooperative maze chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, kinematics, ghost AI, round control)
//! - `profiles`: Player names and currency, credited when a round is left
//! - `settings`: Runtime configuration

pub mod profiles;
pub mod settings;
pub mod sim;

pub use profiles::Profiles;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate; all timers count ticks at this rate
    pub const FPS: u32 = 60;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 900.0;
    pub const SCREEN_HEIGHT: f32 = 650.0;

    /// Maze dimensions
    pub const CELL_SIZE: f32 = 20.0;
    pub const GRID_WIDTH: usize = 28;
    pub const GRID_HEIGHT: usize = 31;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const PLAYER_RADIUS: f32 = CELL_SIZE / 2.0 - 2.0;
    pub const POWER_DURATION_TICKS: u32 = 8 * FPS;
    pub const RESPAWN_DURATION_TICKS: u32 = 3 * FPS;
    /// Mouth animation step and wrap angle (degrees, cosmetic)
    pub const MOUTH_SPEED: u32 = 8;
    pub const MOUTH_MAX_ANGLE: u32 = 45;

    /// Ghost defaults
    pub const GHOST_BASE_SPEED: f32 = 1.5;
    pub const GHOST_RADIUS: f32 = CELL_SIZE / 2.0 - 3.0;
    pub const FRIGHTENED_DURATION_TICKS: u32 = 7 * FPS;
    pub const SCATTER_DURATION_TICKS: u32 = 7 * FPS;
    pub const CHASE_DURATION_TICKS: u32 = 20 * FPS;
    pub const FRIGHTENED_SPEED_FACTOR: f32 = 0.7;
    pub const EYES_SPEED_FACTOR: f32 = 2.0;
    /// Eyes are home once within this many pixels on both axes
    pub const HOME_TOLERANCE: f32 = 5.0;
    /// Direction choice scores the point this many cells ahead
    pub const LOOKAHEAD_CELLS: f32 = 2.0;
    pub const PINKY_LEAD_CELLS: f32 = 4.0;
    pub const INKY_PIVOT_CELLS: f32 = 2.0;
    pub const CLYDE_SHY_CELLS: f32 = 8.0;

    /// Scoring
    pub const DOT_SCORE: u64 = 10;
    pub const ENERGIZER_SCORE: u64 = 50;
    pub const GHOST_SCORE: u64 = 200;
    /// Score points per currency unit credited at round exit
    pub const SCORE_PER_COIN: u64 = 100;

    /// Round defaults
    pub const SHARED_LIVES: u8 = 5;
    pub const PLAYER_COUNT: usize = 2;
    pub const PLAYER_START_ROW: usize = 23;
    pub const PLAYER_START_COL: usize = 13;
    pub const GHOST_START: (usize, usize) = (13, 11);
}

/// Pixel-space center of a maze cell (row 0 is the top row, y grows upward)
#[inline]
pub fn cell_center(col: i32, row: i32) -> Vec2 {
    use consts::*;
    Vec2::new(
        col as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        (GRID_HEIGHT as i32 - 1 - row) as f32 * CELL_SIZE + CELL_SIZE / 2.0,
    )
}

/// Maze cell containing a pixel-space point (may be out of range)
#[inline]
pub fn cell_of(pos: Vec2) -> (i32, i32) {
    use consts::*;
    let col = (pos.x / CELL_SIZE).floor() as i32;
    let row = GRID_HEIGHT as i32 - 1 - (pos.y / CELL_SIZE).floor() as i32;
    (col, row)
}
