//! Spawn timers and random construction of enemies, power-ups and particles.
//!
//! All randomness comes through the injected `Rng`, so a seeded generator
//! makes every spawn reproducible.

use std::f64::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::entities::{
    Enemy, EnemyKind, GameSession, Particle, PowerUp, PowerUpKind, FIELD_WIDTH,
};

pub const POWER_UP_INTERVAL_MS: f64 = 10_000.0;
/// Horizontal margin and spawn height used for falling power-ups.
pub const POWER_UP_SPAWN_MARGIN: f64 = 30.0;

pub const ENEMY_HIT_PARTICLES: usize = 5;
pub const PLAYER_HIT_PARTICLES: usize = 10;
pub const BOMB_PARTICLES: usize = 20;

/// Milliseconds between enemy spawns; shrinks linearly with level.
pub fn enemy_spawn_interval(level: u32) -> f64 {
    (500.0 - level as f64 * 50.0).max(100.0)
}

pub fn random_enemy(level: u32, rng: &mut impl Rng) -> Enemy {
    let kind = *EnemyKind::ALL
        .choose(rng)
        .unwrap_or(&EnemyKind::Basic);
    let size = kind.profile().size;
    let x = rng.gen_range(0.0..FIELD_WIDTH - size);
    Enemy::new(x, -size, kind, level)
}

pub fn random_power_up(rng: &mut impl Rng) -> PowerUp {
    let kind = *PowerUpKind::ALL
        .choose(rng)
        .unwrap_or(&PowerUpKind::Weapon);
    PowerUp {
        x: rng.gen_range(0.0..FIELD_WIDTH - POWER_UP_SPAWN_MARGIN),
        y: -POWER_UP_SPAWN_MARGIN,
        kind,
        bob: rng.gen_range(0.0..TAU),
    }
}

pub fn explosion_particle(x: f64, y: f64, rng: &mut impl Rng) -> Particle {
    Particle {
        x,
        y,
        vx: (rng.gen::<f64>() - 0.5) * 10.0,
        vy: (rng.gen::<f64>() - 0.5) * 10.0,
        life: 1.0,
        decay: rng.gen::<f64>() * 0.02 + 0.01,
        size: rng.gen::<f64>() * 5.0 + 2.0,
    }
}

/// Append `count` explosion particles centred on (x, y).
pub fn explode(particles: &mut Vec<Particle>, x: f64, y: f64, count: usize, rng: &mut impl Rng) {
    particles.extend((0..count).map(|_| explosion_particle(x, y, rng)));
}

/// Accumulate both spawn timers by `dt` and spawn whatever came due.
///
/// A timer fires when it strictly exceeds its interval and then restarts
/// from zero; at most one enemy and one power-up spawn per tick.
pub fn advance_spawners(state: &mut GameSession, dt: f64, rng: &mut impl Rng) {
    state.enemy_spawn_timer += dt;
    if state.enemy_spawn_timer > enemy_spawn_interval(state.level) {
        let enemy = random_enemy(state.level, rng);
        trace!(kind = ?enemy.kind, x = enemy.x, "enemy spawned");
        state.enemies.push(enemy);
        state.enemy_spawn_timer = 0.0;
    }

    state.power_up_spawn_timer += dt;
    if state.power_up_spawn_timer > POWER_UP_INTERVAL_MS {
        let power_up = random_power_up(rng);
        trace!(kind = ?power_up.kind, x = power_up.x, "power-up spawned");
        state.power_ups.push(power_up);
        state.power_up_spawn_timer = 0.0;
    }
}
