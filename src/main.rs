//! Maze Chase entry point
//!
//! Headless runner: loads settings and profiles, plays one round with the
//! autopilot at full speed, then credits the team's earnings.

use std::path::PathBuf;

use maze_chase::sim::{GameEvent, GamePhase, GameState, Maze, TickInput, tick};
use maze_chase::{Profiles, Settings};

fn main() {
    env_logger::init();
    log::info!("Maze Chase (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("maze_chase_settings.json"));
    let settings = Settings::load(&settings_path);
    let mut profiles = Profiles::load(&settings.profile_path);
    let [p1, p2] = profiles.round_names();
    log::info!("{}: ARROWS, {}: WASD", p1, p2);

    let seed = settings.effective_seed();
    let mut state = GameState::with_maze(Maze::classic(), seed, settings.effective_lives());
    log::info!("Game initialized with seed: {}", seed);

    let mut input = TickInput {
        start: true,
        autopilot: settings.autopilot,
        ..Default::default()
    };

    while !state.is_finished() && state.time_ticks < settings.max_ticks {
        tick(&mut state, &input);
        input.start = false;

        for event in state.drain_events() {
            match event {
                GameEvent::GhostEaten { ghost, player } => {
                    log::info!("{} ate {}", profiles.name(player), ghost.as_str());
                }
                GameEvent::LifeLost { remaining } => {
                    log::info!("Lives left: {}", remaining);
                }
                _ => {}
            }
        }
    }

    let outcome = match state.phase {
        GamePhase::Won => "Victory!",
        GamePhase::GameOver => "Game over",
        _ => "Out of time",
    };
    let coins = state.credit();
    println!(
        "{} Score: {} ({} coins) after {} ticks",
        outcome, state.score, coins, state.time_ticks
    );
    for player in &state.players {
        println!("  {}: {}", profiles.name(player.id), player.score);
    }

    if state.is_finished() {
        profiles.credit(coins);
        profiles.save(&settings.profile_path);
    }
}
