//! Ghost AI
//!
//! Each ghost runs a small state machine:
//! - Scatter/Chase alternate on a phase timer (7s / 20s)
//! - Frightened and Eyes are overlays that suspend the phase timer
//! - Targets depend on the ghost's identity; heading is picked greedily by
//!   scoring the point two cells ahead in each candidate direction
//!
//! No pathfinding; ghosts only ever look one step ahead.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kinematics::{Body, Direction};
use super::maze::Maze;
use super::player::Player;
use crate::cell_center;
use crate::consts::*;

/// Ghost identity; selects scatter corner and chase strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhostName {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostName {
    pub const ALL: [GhostName; 4] = [
        GhostName::Blinky,
        GhostName::Pinky,
        GhostName::Inky,
        GhostName::Clyde,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GhostName::Blinky => "Blinky",
            GhostName::Pinky => "Pinky",
            GhostName::Inky => "Inky",
            GhostName::Clyde => "Clyde",
        }
    }

    /// Home corner cell used while scattering
    pub fn scatter_cell(&self) -> (i32, i32) {
        let right = GRID_WIDTH as i32 - 2;
        let bottom = GRID_HEIGHT as i32 - 2;
        match self {
            GhostName::Blinky => (right, 1),
            GhostName::Pinky => (2, 1),
            GhostName::Inky => (right, bottom),
            GhostName::Clyde => (2, bottom),
        }
    }

    pub fn scatter_target(&self) -> Vec2 {
        let (col, row) = self.scatter_cell();
        cell_center(col, row)
    }

    /// Chase target against `player`. Inky needs Blinky's live position and
    /// falls back to its corner without it.
    pub fn chase_target(&self, ghost_pos: Vec2, player: &Player, blinky: Option<Vec2>) -> Vec2 {
        let target = player.body.pos;
        let heading = player.body.dir.vector();

        match self {
            GhostName::Blinky => target,
            GhostName::Pinky => target + heading * CELL_SIZE * PINKY_LEAD_CELLS,
            GhostName::Inky => match blinky {
                Some(blinky) => {
                    let pivot = target + heading * CELL_SIZE * INKY_PIVOT_CELLS;
                    2.0 * pivot - blinky
                }
                None => self.scatter_target(),
            },
            GhostName::Clyde => {
                if ghost_pos.distance(target) > CELL_SIZE * CLYDE_SHY_CELLS {
                    target
                } else {
                    self.scatter_target()
                }
            }
        }
    }
}

/// Overlay modes that take precedence over scatter/chase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Overlay {
    #[default]
    None,
    Frightened {
        ticks_left: u32,
    },
    /// Eaten; only the eyes travel back home
    Eyes,
}

/// Effective behavior mode (for rendering and tests)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostMode {
    Chase,
    Scatter,
    Frightened,
    EyesOnly,
}

/// A ghost entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ghost {
    pub name: GhostName,
    pub body: Body,
    pub base_speed: f32,
    pub overlay: Overlay,
    pub scatter_mode: bool,
    /// Ticks spent in the current scatter/chase phase
    pub phase_ticks: u32,
    pub home: (i32, i32),
}

impl Ghost {
    pub fn new(name: GhostName, home: (i32, i32)) -> Self {
        Self {
            name,
            body: Body::at_cell(home.0, home.1, Direction::Left, GHOST_BASE_SPEED, GHOST_RADIUS),
            base_speed: GHOST_BASE_SPEED,
            overlay: Overlay::None,
            scatter_mode: false,
            phase_ticks: 0,
            home,
        }
    }

    pub fn mode(&self) -> GhostMode {
        match self.overlay {
            Overlay::Frightened { .. } => GhostMode::Frightened,
            Overlay::Eyes => GhostMode::EyesOnly,
            Overlay::None if self.scatter_mode => GhostMode::Scatter,
            Overlay::None => GhostMode::Chase,
        }
    }

    #[inline]
    pub fn is_frightened(&self) -> bool {
        matches!(self.overlay, Overlay::Frightened { .. })
    }

    #[inline]
    pub fn is_eyes(&self) -> bool {
        self.overlay == Overlay::Eyes
    }

    /// Ticks of fright remaining (0 when not frightened)
    pub fn frightened_ticks(&self) -> u32 {
        match self.overlay {
            Overlay::Frightened { ticks_left } => ticks_left,
            _ => 0,
        }
    }

    /// Per-tick timers: fright countdown, then the scatter/chase phase
    pub fn update(&mut self) {
        if let Overlay::Frightened { ticks_left } = &mut self.overlay {
            *ticks_left = ticks_left.saturating_sub(1);
            if *ticks_left == 0 {
                self.overlay = Overlay::None;
                self.body.speed = self.base_speed;
            }
        }

        if self.overlay == Overlay::None {
            self.phase_ticks += 1;
            let limit = if self.scatter_mode {
                SCATTER_DURATION_TICKS
            } else {
                CHASE_DURATION_TICKS
            };
            if self.phase_ticks >= limit {
                self.scatter_mode = !self.scatter_mode;
                self.phase_ticks = 0;
                log::debug!(
                    "{} switches to {}",
                    self.name.as_str(),
                    if self.scatter_mode { "scatter" } else { "chase" }
                );
            }
        }
    }

    /// Turn blue and slow down. Eyes are immune.
    pub fn activate_frightened(&mut self) {
        if self.is_eyes() {
            return;
        }
        self.overlay = Overlay::Frightened {
            ticks_left: FRIGHTENED_DURATION_TICKS,
        };
        self.body.speed = self.base_speed * FRIGHTENED_SPEED_FACTOR;
    }

    /// Eaten by a powered player
    pub fn die(&mut self) {
        self.overlay = Overlay::Eyes;
    }

    /// Back to the home cell with overlays cleared
    pub fn respawn(&mut self) {
        self.body.snap_to(self.home.0, self.home.1);
        self.body.dir = Direction::Left;
        self.overlay = Overlay::None;
        self.body.speed = self.base_speed;
    }

    /// Legal headings excluding a reversal, or the reversal alone if nothing
    /// else is legal
    fn candidates(&self, maze: &Maze) -> Vec<Direction> {
        let reverse = self.body.dir.opposite();
        let options: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| d != reverse && self.body.can_move(maze, d))
            .collect();
        if options.is_empty() {
            vec![reverse]
        } else {
            options
        }
    }

    /// Candidate whose point two cells ahead is closest to `target`;
    /// ties keep the earliest in enumeration order
    fn greedy_toward(&self, candidates: &[Direction], target: Vec2) -> Direction {
        let mut best = candidates[0];
        let mut best_dist = f32::INFINITY;
        for &dir in candidates {
            let ahead = self.body.pos + dir.vector() * CELL_SIZE * LOOKAHEAD_CELLS;
            let dist = ahead.distance(target);
            if dist < best_dist {
                best_dist = dist;
                best = dir;
            }
        }
        best
    }

    /// Current target point, or `None` when there is nobody to chase
    pub fn target(&self, players: &[Player], blinky: Option<Vec2>) -> Option<Vec2> {
        if self.is_eyes() {
            return Some(cell_center(self.home.0, self.home.1));
        }
        if self.scatter_mode {
            return Some(self.name.scatter_target());
        }
        let prey = players.iter().filter(|p| p.is_active()).min_by(|a, b| {
            let da = self.body.pos.distance(a.body.pos);
            let db = self.body.pos.distance(b.body.pos);
            da.total_cmp(&db)
        })?;
        Some(self.name.chase_target(self.body.pos, prey, blinky))
    }

    /// Pick this tick's heading
    pub fn choose_direction<R: Rng>(
        &mut self,
        maze: &Maze,
        players: &[Player],
        blinky: Option<Vec2>,
        rng: &mut R,
    ) {
        if self.is_eyes() {
            self.return_home(maze);
            return;
        }

        let candidates = self.candidates(maze);

        if self.is_frightened() {
            self.body.dir = candidates[rng.random_range(0..candidates.len())];
            return;
        }

        match self.target(players, blinky) {
            Some(target) => self.body.dir = self.greedy_toward(&candidates, target),
            None => self.return_home(maze),
        }
    }

    /// Steer toward the home cell at double speed; arriving clears every
    /// overlay and restores base speed
    fn return_home(&mut self, maze: &Maze) {
        let home = cell_center(self.home.0, self.home.1);
        let offset = (self.body.pos - home).abs();
        if offset.x < HOME_TOLERANCE && offset.y < HOME_TOLERANCE {
            if self.is_eyes() {
                log::debug!("{} is home", self.name.as_str());
            }
            self.overlay = Overlay::None;
            self.body.speed = self.base_speed;
            return;
        }

        let candidates = self.candidates(maze);
        self.body.dir = self.greedy_toward(&candidates, home);
        self.body.speed = self.base_speed * EYES_SPEED_FACTOR;
    }

    /// Advance one step; a blocked ghost picks any legal heading at random
    pub fn move_in<R: Rng>(&mut self, maze: &Maze, rng: &mut R) {
        self.body.wrap_horizontal();

        if self.body.can_move(maze, self.body.dir) {
            self.body.step();
        } else {
            let legal: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&d| self.body.can_move(maze, d))
                .collect();
            self.body.dir = if legal.is_empty() {
                Direction::None
            } else {
                legal[rng.random_range(0..legal.len())]
            };
        }
    }
}
