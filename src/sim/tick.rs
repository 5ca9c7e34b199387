//! Fixed timestep simulation tick
//!
//! Core game loop that advances a round deterministically. Order within a
//! tick is fixed: players, pickups, ghosts, then collisions.

use super::ghost::GhostName;
use super::kinematics::Direction;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// A single key binding: which player, which way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub player: usize,
    pub dir: Direction,
}

impl Control {
    /// Arrows drive player 1, WASD drives player 2
    pub fn from_key(key: &str) -> Option<Self> {
        let (player, dir) = match key.to_lowercase().as_str() {
            "arrowup" | "up" => (0, Direction::Up),
            "arrowdown" | "down" => (0, Direction::Down),
            "arrowleft" | "left" => (0, Direction::Left),
            "arrowright" | "right" => (0, Direction::Right),
            "w" => (1, Direction::Up),
            "s" => (1, Direction::Down),
            "a" => (1, Direction::Left),
            "d" => (1, Direction::Right),
            _ => return None,
        };
        Some(Self { player, dir })
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Requested heading per player
    pub directions: [Option<Direction>; PLAYER_COUNT],
    /// Leave the title card
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Play again after the round has ended
    pub restart: bool,
    /// Autopilot drives both players (demo mode)
    pub autopilot: bool,
}

impl TickInput {
    /// Fold a key press into this tick's input
    pub fn press(&mut self, key: &str) {
        if let Some(control) = Control::from_key(key) {
            self.directions[control.player] = Some(control.dir);
            return;
        }
        match key.to_lowercase().as_str() {
            " " | "space" => self.start = true,
            "p" => self.pause = true,
            "r" => self.restart = true,
            _ => {}
        }
    }
}

/// Advance the round by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.restart && state.is_finished() {
        state.reset();
        state.phase = GamePhase::Playing;
        log::info!("Round restarted");
        return;
    }

    if input.start && state.phase == GamePhase::Ready {
        state.phase = GamePhase::Playing;
        log::info!("Round started with seed {}", state.seed);
    }

    // A pause toggle consumes the tick either way
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                return;
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    for (i, dir) in input.directions.iter().enumerate() {
        if let (Some(dir), Some(player)) = (dir, state.players.get_mut(i)) {
            player.set_direction(&state.maze, *dir);
        }
    }

    if input.autopilot {
        for i in 0..state.players.len() {
            if let Some(dir) = autopilot_direction(state, i) {
                let player = &mut state.players[i];
                player.set_direction(&state.maze, dir);
            }
        }
    }

    state.time_ticks += 1;

    update_players(state);

    if state.dots.is_empty() && state.energizers.is_empty() {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Victory { score: state.score });
        log::info!("Maze cleared! Final score {}", state.score);
        return;
    }

    update_ghosts(state);
    resolve_collisions(state);
}

/// Move players and let them eat whatever is under them
fn update_players(state: &mut GameState) {
    for i in 0..state.players.len() {
        let player = &mut state.players[i];
        player.update();
        player.move_in(&state.maze);

        if !player.alive {
            continue;
        }
        let cell = player.body.cell();

        if let Some(idx) = state.dots.iter().position(|&d| d == cell) {
            state.dots.remove(idx);
            player.score += DOT_SCORE;
            state.score += DOT_SCORE;
            state.events.push(GameEvent::DotEaten { player: i, cell });
        }

        if let Some(idx) = state.energizers.iter().position(|&e| e == cell) {
            state.energizers.remove(idx);
            player.score += ENERGIZER_SCORE;
            state.score += ENERGIZER_SCORE;
            player.activate_power();
            for ghost in &mut state.ghosts {
                ghost.activate_frightened();
            }
            state.events.push(GameEvent::EnergizerEaten { player: i, cell });
            state.events.push(GameEvent::PowerActivated { player: i });
        }
    }
}

/// Timers, targeting and movement for each ghost in order
fn update_ghosts(state: &mut GameState) {
    for i in 0..state.ghosts.len() {
        // Looked up fresh so Inky sees where Blinky moved this tick
        let blinky = state.ghost(GhostName::Blinky).map(|g| g.body.pos);

        let ghost = &mut state.ghosts[i];
        ghost.update();
        ghost.choose_direction(&state.maze, &state.players, blinky, &mut state.rng);
        ghost.move_in(&state.maze, &mut state.rng);
    }
}

/// Ghost/player contact, deaths and shared lives
fn resolve_collisions(state: &mut GameState) {
    let mut someone_died = false;

    for ghost in &mut state.ghosts {
        for player in &mut state.players {
            if !player.is_active() {
                continue;
            }
            if ghost.body.distance_to(&player.body) >= player.body.radius + ghost.body.radius {
                continue;
            }

            if ghost.is_frightened() {
                ghost.die();
                player.score += GHOST_SCORE;
                state.score += GHOST_SCORE;
                state.events.push(GameEvent::GhostEaten {
                    ghost: ghost.name,
                    player: player.id,
                });
                log::debug!("Player {} ate {}", player.id + 1, ghost.name.as_str());
            } else if !ghost.is_eyes() {
                player.die();
                someone_died = true;
                state.events.push(GameEvent::PlayerDied { player: player.id });
            }
        }
    }

    if !someone_died || state.players.iter().any(|p| p.alive) {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        remaining: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over. Final score {}", state.score);
    } else {
        log::info!("Team wiped, {} lives left", state.lives);
        state.respawn_all();
        state.events.push(GameEvent::RoundReset);
    }
}

/// Demo driver: head for the nearest pickup, shy away from live ghosts.
/// Only decides at cell centers and only into open neighbor cells.
fn autopilot_direction(state: &GameState, index: usize) -> Option<Direction> {
    let player = state.players.get(index)?;
    if !player.is_active() || !player.body.at_cell_center() {
        return None;
    }

    let (col, row) = player.body.cell();
    let target = state
        .dots
        .iter()
        .chain(state.energizers.iter())
        .map(|&(c, r)| crate::cell_center(c, r))
        .min_by(|a, b| {
            a.distance(player.body.pos)
                .total_cmp(&b.distance(player.body.pos))
        })?;

    let open: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| {
            let (dc, dr) = d.cell_step();
            !state.maze.is_wall(col + dc, row + dr)
        })
        .collect();
    let reverse = player.body.dir.opposite();
    let forward: Vec<Direction> = open.iter().copied().filter(|&d| d != reverse).collect();
    let options = if forward.is_empty() { open } else { forward };

    let danger_radius = CELL_SIZE * 3.0;
    options.into_iter().min_by(|&a, &b| {
        let cost = |dir: Direction| {
            let ahead = player.body.pos + dir.vector() * CELL_SIZE * LOOKAHEAD_CELLS;
            let threat = state
                .ghosts
                .iter()
                .filter(|g| !g.is_frightened() && !g.is_eyes())
                .any(|g| g.body.pos.distance(ahead) < danger_radius);
            ahead.distance(target) + if threat { 10_000.0 } else { 0.0 }
        };
        cost(a).total_cmp(&cost(b))
    })
}
