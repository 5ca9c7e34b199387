//! Player-controlled entities
//!
//! Two players share the maze. Each has its own queued input, power timer and
//! respawn countdown; lives are pooled at the round level.

use serde::{Deserialize, Serialize};

use super::kinematics::{Body, Direction};
use super::maze::Maze;
use crate::consts::*;

/// A player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: usize,
    pub body: Body,
    /// Heading to adopt at the next cell center
    pub next_dir: Direction,
    pub alive: bool,
    pub respawning: bool,
    pub respawn_timer: u32,
    pub power_mode: bool,
    pub power_timer: u32,
    /// Points earned by this player (the round also keeps a total)
    pub score: u64,
    /// Mouth opening angle in degrees (cosmetic)
    pub mouth_angle: u32,
    pub mouth_open: bool,
    start: (i32, i32),
}

impl Player {
    pub fn new(id: usize, col: i32, row: i32) -> Self {
        Self {
            id,
            body: Body::at_cell(col, row, Direction::Right, PLAYER_SPEED, PLAYER_RADIUS),
            next_dir: Direction::Right,
            alive: true,
            respawning: false,
            respawn_timer: 0,
            power_mode: false,
            power_timer: 0,
            score: 0,
            mouth_angle: 0,
            mouth_open: true,
            start: (col, row),
        }
    }

    /// Alive and not waiting out a respawn
    #[inline]
    pub fn is_active(&self) -> bool {
        self.alive && !self.respawning
    }

    /// Queue a heading; take it immediately if it is legal right now
    pub fn set_direction(&mut self, maze: &Maze, dir: Direction) {
        if dir == Direction::None {
            return;
        }
        self.next_dir = dir;
        if self.body.can_move(maze, dir) {
            self.body.dir = dir;
        }
    }

    /// Per-tick timers
    pub fn update(&mut self) {
        self.mouth_angle += MOUTH_SPEED;
        if self.mouth_angle > MOUTH_MAX_ANGLE {
            self.mouth_angle = 0;
            self.mouth_open = !self.mouth_open;
        }

        if self.power_mode {
            self.power_timer = self.power_timer.saturating_sub(1);
            if self.power_timer == 0 {
                self.power_mode = false;
            }
        }

        if self.respawning {
            self.respawn_timer = self.respawn_timer.saturating_sub(1);
            if self.respawn_timer == 0 {
                self.respawning = false;
                self.alive = true;
            }
        }
    }

    /// Advance one step, turning only at cell centers
    pub fn move_in(&mut self, maze: &Maze) {
        if !self.is_active() {
            return;
        }

        let (col, row) = self.body.cell();

        if self.body.at_cell_center()
            && self.next_dir != self.body.dir
            && self.body.can_move(maze, self.next_dir)
        {
            self.body.dir = self.next_dir;
        }

        if self.body.can_move(maze, self.body.dir) {
            self.body.step();
        } else {
            self.body.snap_to(col, row);
        }

        self.body.wrap_horizontal();
    }

    pub fn activate_power(&mut self) {
        self.power_mode = true;
        self.power_timer = POWER_DURATION_TICKS;
    }

    /// Knocked out; power is lost with the life
    pub fn die(&mut self) {
        self.alive = false;
        self.respawning = true;
        self.respawn_timer = RESPAWN_DURATION_TICKS;
        self.power_mode = false;
        self.power_timer = 0;
    }

    /// Back to the start cell with a clean slate (score is kept)
    pub fn respawn(&mut self) {
        let (col, row) = self.start;
        self.body.snap_to(col, row);
        self.body.dir = Direction::Right;
        self.next_dir = Direction::Right;
        self.power_mode = false;
        self.power_timer = 0;
        self.alive = true;
        self.respawning = false;
        self.respawn_timer = 0;
    }

    /// Remaining power as a fraction of the full duration (for the HUD bar)
    pub fn power_fraction(&self) -> f32 {
        if !self.power_mode {
            return 0.0;
        }
        self.power_timer as f32 / POWER_DURATION_TICKS as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_center;

    #[test]
    fn test_respawn_takes_exact_duration() {
        let mut player = Player::new(0, 13, 23);
        player.activate_power();
        player.die();
        assert!(!player.alive);
        assert!(player.respawning);

        for _ in 0..RESPAWN_DURATION_TICKS - 1 {
            player.update();
            assert!(!player.alive);
            assert!(player.respawning);
        }
        player.update();
        assert!(player.alive);
        assert!(!player.respawning);
        assert!(!player.power_mode);
        assert_eq!(player.power_fraction(), 0.0);
    }

    #[test]
    fn test_power_expires() {
        let mut player = Player::new(0, 13, 23);
        player.activate_power();
        assert_eq!(player.power_fraction(), 1.0);
        for _ in 0..POWER_DURATION_TICKS - 1 {
            player.update();
        }
        assert!(player.power_mode);
        player.update();
        assert!(!player.power_mode);
        assert_eq!(player.power_fraction(), 0.0);
    }

    #[test]
    fn test_move_is_noop_while_dead() {
        let maze = Maze::classic();
        let mut player = Player::new(0, 13, 23);
        player.die();
        let before = player.body.pos;
        player.move_in(&maze);
        assert_eq!(player.body.pos, before);
    }

    #[test]
    fn test_set_direction_reverses_immediately() {
        let maze = Maze::classic();
        let mut player = Player::new(0, 13, 23);
        player.move_in(&maze);
        player.move_in(&maze);
        assert_eq!(player.body.dir, Direction::Right);

        player.set_direction(&maze, Direction::Left);
        assert_eq!(player.body.dir, Direction::Left);
        assert_eq!(player.next_dir, Direction::Left);
    }

    #[test]
    fn test_set_direction_ignores_none() {
        let maze = Maze::classic();
        let mut player = Player::new(0, 13, 23);
        player.set_direction(&maze, Direction::None);
        assert_eq!(player.next_dir, Direction::Right);
    }

    #[test]
    fn test_queued_turn_waits_for_intersection() {
        let maze = Maze::classic();
        // Row 5 corridor; column 6 opens downward. Start off-center so the
        // first chance to turn is the next cell center.
        let mut player = Player::new(0, 5, 5);
        player.body.pos.x += 5.0;
        player.next_dir = Direction::Down;

        let mut turned_at = None;
        for _ in 0..200 {
            player.move_in(&maze);
            if player.body.dir == Direction::Down {
                turned_at = Some(player.body.cell());
                break;
            }
        }
        assert_eq!(turned_at, Some((6, 5)));
    }

    #[test]
    fn test_blocked_player_snaps_to_center() {
        let maze = Maze::classic();
        let mut player = Player::new(0, 1, 5);
        player.body.dir = Direction::Left;
        player.next_dir = Direction::Left;
        for _ in 0..5 {
            player.move_in(&maze);
        }
        let center = cell_center(1, 5);
        assert!((player.body.pos - center).length() <= PLAYER_SPEED);
        assert_eq!(player.body.cell(), (1, 5));
    }

    #[test]
    fn test_respawn_resets_state() {
        let mut player = Player::new(1, 14, 23);
        player.body.pos.x += 40.0;
        player.score = 120;
        player.activate_power();
        player.die();
        player.respawn();

        assert_eq!(player.body.pos, cell_center(14, 23));
        assert_eq!(player.body.dir, Direction::Right);
        assert!(player.alive && !player.respawning && !player.power_mode);
        assert_eq!(player.score, 120);
    }

    #[test]
    fn test_mouth_animation_toggles() {
        let mut player = Player::new(0, 13, 23);
        let open = player.mouth_open;
        for _ in 0..6 {
            player.update();
        }
        assert_ne!(player.mouth_open, open);
        assert_eq!(player.mouth_angle, 0);
    }
}
