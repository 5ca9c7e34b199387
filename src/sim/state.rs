//! Round state and core simulation types
//!
//! Everything needed to reproduce a round from its seed lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ghost::{Ghost, GhostName};
use super::maze::Maze;
use super::player::Player;
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title card, waiting for the start input
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Shared lives ran out
    GameOver,
    /// Every dot and energizer eaten
    Won,
}

/// Discrete things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DotEaten { player: usize, cell: (i32, i32) },
    EnergizerEaten { player: usize, cell: (i32, i32) },
    PowerActivated { player: usize },
    GhostEaten { ghost: GhostName, player: usize },
    PlayerDied { player: usize },
    LifeLost { remaining: u8 },
    /// Everyone was sent back to their start cells
    RoundReset,
    Victory { score: u64 },
    GameOver { score: u64 },
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Shared RNG (frightened and blocked ghosts)
    pub rng: Pcg32,
    pub maze: Maze,
    pub players: Vec<Player>,
    /// Ghosts in `GhostName::ALL` order; Inky finds Blinky by name
    pub ghosts: Vec<Ghost>,
    /// Remaining dot cells
    pub dots: Vec<(i32, i32)>,
    /// Remaining energizer cells
    pub energizers: Vec<(i32, i32)>,
    /// Team score
    pub score: u64,
    /// Shared lives, lost only when every player is down at once
    pub lives: u8,
    /// Lives a fresh round starts with
    pub starting_lives: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Events produced by the last tick (drained by the caller)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a round on the built-in maze
    pub fn new(seed: u64) -> Self {
        Self::with_maze(Maze::classic(), seed, SHARED_LIVES)
    }

    pub fn with_maze(maze: Maze, seed: u64, lives: u8) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            dots: maze.dots().to_vec(),
            energizers: maze.energizers().to_vec(),
            maze,
            players: Vec::new(),
            ghosts: Vec::new(),
            score: 0,
            lives,
            starting_lives: lives,
            time_ticks: 0,
            phase: GamePhase::Ready,
            events: Vec::new(),
        };
        state.spawn_entities();
        state
    }

    fn spawn_entities(&mut self) {
        self.players = (0..PLAYER_COUNT)
            .map(|i| Player::new(i, (PLAYER_START_COL + i) as i32, PLAYER_START_ROW as i32))
            .collect();

        let home = (GHOST_START.0 as i32, GHOST_START.1 as i32);
        self.ghosts = GhostName::ALL
            .into_iter()
            .map(|name| Ghost::new(name, home))
            .collect();
    }

    /// Rebuild the round from the maze; the RNG stream continues
    pub fn reset(&mut self) {
        self.dots = self.maze.dots().to_vec();
        self.energizers = self.maze.energizers().to_vec();
        self.score = 0;
        self.lives = self.starting_lives;
        self.time_ticks = 0;
        self.events.clear();
        self.spawn_entities();
    }

    /// Send every player and ghost back to its start
    pub fn respawn_all(&mut self) {
        for player in &mut self.players {
            player.respawn();
        }
        for ghost in &mut self.ghosts {
            ghost.respawn();
        }
    }

    pub fn ghost(&self, name: GhostName) -> Option<&Ghost> {
        self.ghosts.iter().find(|g| g.name == name)
    }

    /// Round ended, by victory or defeat
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Won)
    }

    /// Currency earned by this round's score
    pub fn credit(&self) -> u64 {
        self.score / SCORE_PER_COIN
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
