//! The per-tick simulation algorithm
//!
//! One [`tick`] advances the whole game by an elapsed-time delta:
//!
//! 1. move every live entity in registry order
//! 2. emit one draw request per live entity, then the HUD
//! 3. brute-force pairwise collision scan; both members of a colliding pair
//!    get an independent reaction call-out
//! 4. apply deferred removals (exactly once, before any logic runs)
//! 5. run the deferred logic pass if some event requested it
//! 6. evaluate termination and notify the host
//! 7. resolve ship velocity from latched input and attempt to fire
//!
//! Entity counts are tens, not thousands, so the O(n^2) scan stays; no
//! spatial partitioning.

use super::entity::{Entity, EntityId, EntityKind, LogicEvent, MoveEvent, Reaction};
use super::state::{Game, GameOutcome, GamePhase};
use crate::render::RenderSink;

/// Advance the game by `delta_ms` milliseconds.
///
/// Only meaningful while the phase is [`GamePhase::Running`]; any other phase
/// is a no-op, so a driver that keeps firing while paused does no harm.
/// Returns `Some` exactly once, on the tick that ends the session.
pub fn tick<S: RenderSink>(game: &mut Game, delta_ms: f64, sink: &mut S) -> Option<GameOutcome> {
    if game.phase != GamePhase::Running {
        log::trace!("tick ignored in phase {:?}", game.phase);
        return None;
    }

    game.session.iterations += 1;
    game.session.clock_ms += delta_ms;

    // 1. Movement. Only reads/writes each entity's own state, so registry
    // order does not matter for correctness; variant rules report edge
    // contact (aliens) and playfield exit (shots).
    let mut edge_contact = false;
    let mut exited: Vec<EntityId> = Vec::new();
    for entity in game.registry.iter_mut() {
        match entity.advance(delta_ms, &game.tuning) {
            MoveEvent::None => {}
            MoveEvent::EdgeContact => edge_contact = true,
            MoveEvent::LeftPlayfield => exited.push(entity.id),
        }
    }
    if edge_contact {
        game.session.logic_requested = true;
    }
    for id in exited {
        game.registry.schedule_removal(id);
    }

    // 2. Draw emission, fire-and-forget.
    for entity in game.registry.iter() {
        sink.draw_sprite(entity.sprite, entity.pos);
    }
    sink.hud(&game.hud());

    // 3. Pairwise scan. Reactions are collected first and applied after the
    // scan, so no entity is mutated while the registry is being iterated.
    let mut reactions: Vec<Reaction> = Vec::new();
    let live = game.registry.entities();
    for p in 0..live.len() {
        for s in (p + 1)..live.len() {
            let (me, him) = (&live[p], &live[s]);
            if me.collides_with(him) {
                reactions.push(me.collided_with(him));
                reactions.push(him.collided_with(me));
            }
        }
    }
    for reaction in reactions {
        apply_reaction(game, reaction);
    }

    // 4. Purge, exactly once per tick.
    game.registry.purge_scheduled();

    // 5. Deferred logic pass over the still-live population.
    if game.session.logic_requested {
        let mut reached_territory = false;
        for entity in game.registry.iter_mut() {
            if entity.do_logic(&game.tuning) == LogicEvent::ReachedTerritory {
                reached_territory = true;
            }
        }
        if reached_territory {
            log::debug!("aliens reached the territory line");
            game.session.humans_dead = true;
        }
        game.session.logic_requested = false;
    }

    // 6. Termination.
    if game.session.alien_count == 0 || game.session.humans_dead {
        let won = !game.session.humans_dead;
        let outcome = GameOutcome {
            won,
            score: game.score(),
        };
        game.phase = GamePhase::Ended { won };
        log::info!(
            "session ended after {} ticks: {} (score {})",
            game.session.iterations,
            if won { "victory" } else { "defeat" },
            outcome.score
        );
        return Some(outcome);
    }

    // 7. Resolve ship movement from the latched intents and attempt to fire.
    // Both or neither direction held means the ship stands still.
    let vx = match (game.input.left, game.input.right) {
        (true, false) => -game.tuning.ship_speed,
        (false, true) => game.tuning.ship_speed,
        _ => 0.0,
    };
    if let Some(ship) = game.registry.get_mut(game.ship_id) {
        ship.vel.x = vx;
    }
    if game.input.fire {
        try_to_fire(game);
    }

    None
}

/// Attempt to fire a shot from the ship. A debounce, not a queue: if less
/// than the firing interval has passed on the sim clock since the last shot,
/// nothing happens.
pub fn try_to_fire(game: &mut Game) {
    if let Some(last) = game.session.last_fire_ms {
        if game.session.clock_ms - last < game.tuning.firing_interval_ms {
            return;
        }
    }
    let Some(ship) = game.registry.get(game.ship_id) else {
        return;
    };
    let pos = ship.pos + game.tuning.shot_offset;
    game.session.last_fire_ms = Some(game.session.clock_ms);

    let id = game.registry.next_entity_id();
    game.registry.add(Entity::shot(id, pos, &game.tuning));
    log::debug!("shot fired from {pos}");
}

/// Apply one reaction from the collision scan. Effects only schedule
/// removals and update session state; nothing is removed mid-scan.
fn apply_reaction(game: &mut Game, reaction: Reaction) {
    match reaction {
        Reaction::None => {}
        Reaction::AlienKilled { shot, alien } => {
            // A shot already spent this tick deals no further damage, and an
            // alien already killed by another shot cannot die twice.
            if game.registry.is_pending(shot) || game.registry.is_pending(alien) {
                return;
            }
            game.registry.schedule_removal(shot);
            game.registry.schedule_removal(alien);
            notify_alien_killed(game);
        }
        Reaction::ShipHit { ship } => {
            game.registry.schedule_removal(ship);
            game.session.humans_dead = true;
            log::debug!("ship hit by an alien");
        }
    }
}

/// Bookkeeping for a confirmed kill: decrement the count and, while any
/// aliens survive, speed every one of them up. An empty board gets no
/// escalation pass.
fn notify_alien_killed(game: &mut Game) {
    game.session.alien_count -= 1;
    log::debug!("alien killed, {} left", game.session.alien_count);

    if game.session.alien_count == 0 {
        return;
    }
    let speedup = game.tuning.alien_speedup;
    for entity in game.registry.iter_surviving_mut() {
        if entity.kind == EntityKind::Alien {
            entity.vel.x *= speedup;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSink;
    use crate::settings::Tuning;
    use glam::Vec2;

    fn running_game() -> Game {
        let mut game = Game::new(Tuning::default());
        game.new_game();
        game
    }

    fn first_alien_id(game: &Game) -> EntityId {
        game.registry
            .iter()
            .find(|e| e.kind == EntityKind::Alien)
            .map(|e| e.id)
            .unwrap()
    }

    fn shot_count(game: &Game) -> usize {
        game.registry
            .iter()
            .filter(|e| e.kind == EntityKind::Shot)
            .count()
    }

    /// Drop a shot dead-center on the given entity, bypassing the debounce.
    fn plant_shot_on(game: &mut Game, target: EntityId) -> EntityId {
        let center = {
            let e = game.registry.get(target).unwrap();
            e.pos + e.size / 2.0
        };
        let id = game.registry.next_entity_id();
        let mut shot = Entity::shot(id, center, &game.tuning);
        shot.pos -= shot.size / 2.0;
        game.registry.add(shot);
        id
    }

    #[test]
    fn tick_is_a_noop_outside_running() {
        let mut game = Game::new(Tuning::default());
        assert_eq!(tick(&mut game, 100.0, &mut NullSink), None);
        assert_eq!(game.session.iterations, 0);

        game.new_game();
        game.toggle_pause();
        let before: Vec<Vec2> = game.registry.iter().map(|e| e.pos).collect();
        assert_eq!(tick(&mut game, 100.0, &mut NullSink), None);
        let after: Vec<Vec2> = game.registry.iter().map(|e| e.pos).collect();
        assert_eq!(before, after);
        assert_eq!(game.session.iterations, 0);
    }

    #[test]
    fn iterations_and_clock_advance_per_tick() {
        let mut game = running_game();
        tick(&mut game, 100.0, &mut NullSink);
        tick(&mut game, 100.0, &mut NullSink);
        assert_eq!(game.session.iterations, 2);
        assert_eq!(game.session.clock_ms, 200.0);
    }

    #[test]
    fn shot_kills_alien_and_both_are_purged() {
        let mut game = running_game();
        let alien = first_alien_id(&game);
        let shot = plant_shot_on(&mut game, alien);
        let before = game.registry.len();

        tick(&mut game, 0.0, &mut NullSink);

        assert!(game.registry.get(alien).is_none());
        assert!(game.registry.get(shot).is_none());
        assert_eq!(game.registry.len(), before - 2);
        assert_eq!(game.session.alien_count, 59);
    }

    #[test]
    fn kill_escalates_every_surviving_alien_by_two_percent() {
        let mut game = running_game();
        let alien = first_alien_id(&game);
        plant_shot_on(&mut game, alien);
        let base = game.tuning.alien_speed;

        tick(&mut game, 0.0, &mut NullSink);

        for survivor in game
            .registry
            .iter()
            .filter(|e| e.kind == EntityKind::Alien)
        {
            assert!((survivor.vel.x.abs() - base * 1.02).abs() < 1e-4);
        }
    }

    #[test]
    fn escalation_compounds_over_kills() {
        let mut game = running_game();
        for _ in 0..2 {
            let alien = first_alien_id(&game);
            plant_shot_on(&mut game, alien);
            tick(&mut game, 0.0, &mut NullSink);
        }
        let base = game.tuning.alien_speed;
        let survivor = game
            .registry
            .iter()
            .find(|e| e.kind == EntityKind::Alien)
            .unwrap();
        assert!((survivor.vel.x.abs() - base * 1.02 * 1.02).abs() < 1e-3);
    }

    #[test]
    fn two_shots_on_one_alien_count_a_single_kill() {
        let mut game = running_game();
        let alien = first_alien_id(&game);
        let s1 = plant_shot_on(&mut game, alien);
        let s2 = plant_shot_on(&mut game, alien);

        tick(&mut game, 0.0, &mut NullSink);

        assert_eq!(game.session.alien_count, 59);
        // Exactly one of the two shots was spent on the kill
        let spent = [s1, s2]
            .iter()
            .filter(|id| game.registry.get(**id).is_none())
            .count();
        assert_eq!(spent, 1);
    }

    #[test]
    fn last_kill_wins_the_session_without_escalation() {
        let mut game = Game::new(Tuning {
            alien_rows: 1,
            alien_cols: 1,
            ..Tuning::default()
        });
        game.new_game();
        let alien = first_alien_id(&game);
        plant_shot_on(&mut game, alien);

        let outcome = tick(&mut game, 0.0, &mut NullSink);
        assert_eq!(
            outcome,
            Some(GameOutcome {
                won: true,
                score: 499 * 500
            })
        );
        assert_eq!(game.phase, GamePhase::Ended { won: true });
        assert_eq!(game.session.alien_count, 0);
    }

    #[test]
    fn session_stays_terminal_after_the_ending_tick() {
        let mut game = Game::new(Tuning {
            alien_rows: 1,
            alien_cols: 1,
            ..Tuning::default()
        });
        game.new_game();
        let alien = first_alien_id(&game);
        plant_shot_on(&mut game, alien);
        assert!(tick(&mut game, 0.0, &mut NullSink).is_some());

        // Further driver ticks must not mutate anything
        let iterations = game.session.iterations;
        assert_eq!(tick(&mut game, 100.0, &mut NullSink), None);
        assert_eq!(game.session.iterations, iterations);
    }

    #[test]
    fn alien_contact_with_ship_loses_the_game() {
        let mut game = running_game();
        let ship_pos = game.registry.get(game.ship_id).unwrap().pos;
        let alien = first_alien_id(&game);
        game.registry.get_mut(alien).unwrap().pos = ship_pos;

        let outcome = tick(&mut game, 0.0, &mut NullSink);
        assert!(game.session.humans_dead);
        assert_eq!(game.phase, GamePhase::Ended { won: false });
        assert_eq!(outcome.map(|o| o.won), Some(false));
        // The ship was scheduled and purged on the same tick
        assert!(game.registry.get(game.ship_id).is_none());
    }

    #[test]
    fn edge_contact_reverses_the_whole_fleet_once() {
        let mut game = running_game();
        // Park one alien on the left bound, still sweeping left
        let alien = first_alien_id(&game);
        game.registry.get_mut(alien).unwrap().pos.x = 0.5;

        tick(&mut game, 10.0, &mut NullSink);

        for alien in game
            .registry
            .iter()
            .filter(|e| e.kind == EntityKind::Alien)
        {
            assert!(alien.vel.x > 0.0, "fleet should sweep right after reversal");
        }
        assert!(!game.session.logic_requested, "request is cleared after the pass");
    }

    #[test]
    fn reversal_drops_the_fleet_toward_the_territory_line() {
        let mut game = running_game();
        let alien = first_alien_id(&game);
        let y_before = game.registry.get(alien).unwrap().pos.y;
        game.registry.get_mut(alien).unwrap().pos.x = 0.5;

        tick(&mut game, 10.0, &mut NullSink);

        let y_after = game.registry.get(alien).unwrap().pos.y;
        assert_eq!(y_after, y_before + game.tuning.alien_drop);
    }

    #[test]
    fn alien_descending_past_the_territory_line_ends_the_game() {
        let mut game = running_game();
        let alien = first_alien_id(&game);
        {
            let a = game.registry.get_mut(alien).unwrap();
            a.pos = Vec2::new(0.5, game.tuning.territory_line - a.size.y - 1.0);
        }

        let outcome = tick(&mut game, 10.0, &mut NullSink);
        assert!(game.session.humans_dead);
        assert_eq!(outcome.map(|o| o.won), Some(false));
    }

    #[test]
    fn entity_pending_at_tick_start_is_gone_and_skips_logic() {
        let mut game = running_game();
        let alien = first_alien_id(&game);
        game.registry.schedule_removal(alien);
        game.session.logic_requested = true;

        tick(&mut game, 0.0, &mut NullSink);
        assert!(game.registry.get(alien).is_none());
        // The pass still ran for the survivors
        for survivor in game
            .registry
            .iter()
            .filter(|e| e.kind == EntityKind::Alien)
        {
            assert!(survivor.vel.x > 0.0);
        }
    }

    #[test]
    fn shot_leaving_the_playfield_is_removed() {
        let mut game = running_game();
        let id = game.registry.next_entity_id();
        game.registry.add(Entity::shot(
            id,
            Vec2::new(100.0, -30.0),
            &game.tuning,
        ));

        tick(&mut game, 100.0, &mut NullSink);
        assert!(game.registry.get(id).is_none());
    }

    #[test]
    fn ship_velocity_follows_latched_intents() {
        let mut game = running_game();
        game.input.left = true;
        tick(&mut game, 0.0, &mut NullSink);
        assert_eq!(
            game.registry.get(game.ship_id).unwrap().vel.x,
            -game.tuning.ship_speed
        );

        game.input.right = true; // both held: tie-break to zero
        tick(&mut game, 0.0, &mut NullSink);
        assert_eq!(game.registry.get(game.ship_id).unwrap().vel.x, 0.0);

        game.input.left = false;
        tick(&mut game, 0.0, &mut NullSink);
        assert_eq!(
            game.registry.get(game.ship_id).unwrap().vel.x,
            game.tuning.ship_speed
        );
    }

    #[test]
    fn fire_debounce_allows_one_shot_per_interval() {
        let mut game = running_game();

        try_to_fire(&mut game);
        assert_eq!(shot_count(&game), 1);

        // 400 ms later: still inside the cooldown
        game.session.clock_ms += 400.0;
        try_to_fire(&mut game);
        assert_eq!(shot_count(&game), 1);

        // 600 ms after the first shot: allowed again
        game.session.clock_ms += 200.0;
        try_to_fire(&mut game);
        assert_eq!(shot_count(&game), 2);
    }

    #[test]
    fn shot_spawns_offset_above_the_ship() {
        let mut game = running_game();
        let ship_pos = game.registry.get(game.ship_id).unwrap().pos;
        try_to_fire(&mut game);
        let shot = game
            .registry
            .iter()
            .find(|e| e.kind == EntityKind::Shot)
            .unwrap();
        assert_eq!(shot.pos, ship_pos + game.tuning.shot_offset);
        assert!(shot.vel.y < 0.0);
    }

    #[test]
    fn holding_fire_respects_the_debounce_across_ticks() {
        let mut game = running_game();
        game.input.fire = true;
        // Five 100 ms ticks cover one 500 ms interval
        for _ in 0..5 {
            tick(&mut game, 100.0, &mut NullSink);
        }
        assert_eq!(shot_count(&game), 1);
        for _ in 0..5 {
            tick(&mut game, 100.0, &mut NullSink);
        }
        assert_eq!(shot_count(&game), 2);
    }
}
