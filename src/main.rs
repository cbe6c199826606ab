//! Headless demo driver
//!
//! Plays the role of the engine's external collaborators: a fixed-interval
//! tick driver, an input source (a tiny autopilot latching intents) and a
//! renderer (discarded). Useful for watching the engine log a full session:
//!
//! ```text
//! RUST_LOG=debug cargo run
//! ```
//!
//! Set `INVADERS_TUNING=path/to/tuning.json` to override game balance and
//! `INVADERS_REALTIME=1` to pace ticks at the nominal cadence instead of
//! running the session as fast as possible.

use std::{env, error::Error, fs, thread, time::Duration};

use space_invaders::consts::TICK_INTERVAL_MS;
use space_invaders::sim::{EntityKind, Game, tick};
use space_invaders::{NullSink, Tuning};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let tuning = match env::var("INVADERS_TUNING") {
        Ok(path) => {
            log::info!("loading tuning from {path}");
            Tuning::from_json_str(&fs::read_to_string(path)?)?
        }
        Err(_) => Tuning::default(),
    };
    let realtime = env::var("INVADERS_REALTIME").is_ok();

    let mut game = Game::new(tuning);
    let mut sink = NullSink;
    game.new_game();

    let outcome = loop {
        steer(&mut game);
        if let Some(outcome) = tick(&mut game, TICK_INTERVAL_MS, &mut sink) {
            break outcome;
        }
        if realtime {
            thread::sleep(Duration::from_millis(TICK_INTERVAL_MS as u64));
        }
    };

    println!(
        "{} after {} ticks, score {}",
        if outcome.won { "Victory" } else { "Game over" },
        game.session.iterations,
        outcome.score
    );
    Ok(())
}

/// Latch intents for the next tick: chase the nearest alien column and keep
/// the trigger held (the engine's debounce does the rate limiting).
fn steer(game: &mut Game) {
    let ship = game
        .registry
        .iter()
        .find(|e| e.kind == EntityKind::Ship)
        .map(|e| e.pos.x + e.size.x / 2.0);
    let Some(ship_center) = ship else {
        return;
    };

    let target = game
        .registry
        .iter()
        .filter(|e| e.kind == EntityKind::Alien)
        .map(|e| e.pos.x + e.size.x / 2.0)
        .min_by(|a, b| {
            (a - ship_center)
                .abs()
                .partial_cmp(&(b - ship_center).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    game.input.fire = true;
    match target {
        Some(x) => {
            // Dead-zone so the ship doesn't jitter around the column
            game.input.left = x < ship_center - 5.0;
            game.input.right = x > ship_center + 5.0;
        }
        None => {
            game.input.left = false;
            game.input.right = false;
        }
    }
}
