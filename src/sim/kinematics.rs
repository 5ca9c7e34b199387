//! Grid-aligned movement shared by players and ghosts
//!
//! Positions are continuous pixel coordinates; legality is decided by
//! sampling the projected center and four corners against the maze.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::maze::Maze;
use crate::consts::*;
use crate::{cell_center, cell_of};

/// Compass heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Fixed enumeration order; ties in direction choice resolve to the earliest
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector (y grows upward)
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::None => Vec2::ZERO,
        }
    }

    /// Neighbor offset in (col, row); rows count downward
    pub fn cell_step(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }
}

/// Position, heading and size of a moving entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub dir: Direction,
    pub speed: f32,
    pub radius: f32,
}

impl Body {
    pub fn at_cell(col: i32, row: i32, dir: Direction, speed: f32, radius: f32) -> Self {
        Self {
            pos: cell_center(col, row),
            dir,
            speed,
            radius,
        }
    }

    /// Cell containing the body's center
    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        cell_of(self.pos)
    }

    /// Check whether one step in `dir` keeps the center and all four corners
    /// out of walls
    pub fn can_move(&self, maze: &Maze, dir: Direction) -> bool {
        if dir == Direction::None {
            return false;
        }

        let next = self.pos + dir.vector() * self.speed;
        let inset = self.radius - 1.0;
        let samples = [
            next,
            next + Vec2::new(-inset, -inset),
            next + Vec2::new(inset, -inset),
            next + Vec2::new(-inset, inset),
            next + Vec2::new(inset, inset),
        ];

        samples.iter().all(|&p| {
            let (col, row) = cell_of(p);
            !maze.is_wall(col, row)
        })
    }

    /// Apply one step along the current heading
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.dir.vector() * self.speed;
    }

    /// Within one speed-step of the current cell center on both axes
    pub fn at_cell_center(&self) -> bool {
        let (col, row) = self.cell();
        let center = cell_center(col, row);
        (self.pos.x - center.x).abs() < self.speed && (self.pos.y - center.y).abs() < self.speed
    }

    /// Snap to the center of the given cell
    pub fn snap_to(&mut self, col: i32, row: i32) {
        self.pos = cell_center(col, row);
    }

    /// Teleport across the horizontal screen edges
    pub fn wrap_horizontal(&mut self) {
        if self.pos.x < -CELL_SIZE {
            self.pos.x = SCREEN_WIDTH + CELL_SIZE;
        } else if self.pos.x > SCREEN_WIDTH + CELL_SIZE {
            self.pos.x = -CELL_SIZE;
        }
    }

    /// Euclidean distance between centers
    #[inline]
    pub fn distance_to(&self, other: &Body) -> f32 {
        self.pos.distance(other.pos)
    }

    /// Every sampled point (center and corners) at the current position
    pub fn sample_cells(&self) -> [(i32, i32); 5] {
        let inset = self.radius - 1.0;
        [
            cell_of(self.pos),
            cell_of(self.pos + Vec2::new(-inset, -inset)),
            cell_of(self.pos + Vec2::new(inset, -inset)),
            cell_of(self.pos + Vec2::new(-inset, inset)),
            cell_of(self.pos + Vec2::new(inset, inset)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(col: i32, row: i32) -> Body {
        Body::at_cell(col, row, Direction::Right, PLAYER_SPEED, PLAYER_RADIUS)
    }

    #[test]
    fn test_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.vector() + dir.opposite().vector(), Vec2::ZERO);
        }
        assert_eq!(Direction::None.opposite(), Direction::None);
    }

    #[test]
    fn test_can_move_open_corridor() {
        let maze = Maze::classic();
        // Row 5 is a long open corridor
        let body = player_at(5, 5);
        assert!(body.can_move(&maze, Direction::Left));
        assert!(body.can_move(&maze, Direction::Right));
    }

    #[test]
    fn test_can_move_blocked_by_wall() {
        let maze = Maze::classic();
        // (1, 1) has walls above and to the left. From dead center one step
        // still fits inside the cell, so nudge toward each wall first.
        let mut body = player_at(1, 1);
        body.pos.y += PLAYER_SPEED;
        assert!(!body.can_move(&maze, Direction::Up));
        assert!(body.can_move(&maze, Direction::Down));

        let mut body = player_at(1, 1);
        body.pos.x -= PLAYER_SPEED;
        assert!(!body.can_move(&maze, Direction::Left));
        assert!(body.can_move(&maze, Direction::Right));
    }

    #[test]
    fn test_none_is_never_legal() {
        let maze = Maze::classic();
        assert!(!player_at(5, 5).can_move(&maze, Direction::None));
    }

    #[test]
    fn test_corner_sampling_blocks_off_center_turn() {
        let maze = Maze::classic();
        // (6, 5) is an intersection: row 5 corridor meets column 6 going down.
        let mut body = player_at(6, 5);
        body.pos.y -= 2.0;
        assert!(body.can_move(&maze, Direction::Down));

        // Shifted 5px left, the projected center is still open but the
        // lower-left corner lands in (5, 6), a wall.
        body.pos.x -= 5.0;
        assert_eq!(body.cell(), (6, 5));
        let center = cell_of(body.pos + Direction::Down.vector() * body.speed);
        assert!(!maze.is_wall(center.0, center.1));
        assert!(!body.can_move(&maze, Direction::Down));
    }

    #[test]
    fn test_at_cell_center() {
        let mut body = player_at(5, 5);
        assert!(body.at_cell_center());
        body.pos.x += 1.5;
        assert!(body.at_cell_center());
        body.pos.x += 1.0;
        assert!(!body.at_cell_center());
    }

    #[test]
    fn test_wraparound() {
        let mut body = player_at(0, 14);
        body.pos.x = -CELL_SIZE - 0.5;
        body.wrap_horizontal();
        assert_eq!(body.pos.x, SCREEN_WIDTH + CELL_SIZE);

        body.pos.x = SCREEN_WIDTH + CELL_SIZE + 0.5;
        body.wrap_horizontal();
        assert_eq!(body.pos.x, -CELL_SIZE);

        body.pos.x = 100.0;
        body.wrap_horizontal();
        assert_eq!(body.pos.x, 100.0);
    }

    #[test]
    fn test_tunnel_is_permissive_past_edge() {
        let maze = Maze::classic();
        let mut body = player_at(0, 14);
        body.pos.x = -5.0;
        assert!(body.can_move(&maze, Direction::Left));
    }
}
