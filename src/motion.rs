//! Per-entity update behaviour: player steering and firing, and the
//! per-tick advance of projectiles, enemies, power-ups and particles.
//!
//! Movement is frame-based (fixed steps per tick), not scaled by elapsed
//! time.

use crate::entities::{
    Enemy, Particle, Player, PowerUp, Projectile, FIELD_HEIGHT, FIELD_WIDTH, PLAYER_SIZE,
    POWER_UP_SPEED,
};

/// Fraction of the remaining distance to the pointer covered each tick.
pub const FOLLOW_FACTOR: f64 = 0.1;
/// Amount added to the shoot timer every tick (one 60 FPS frame).
pub const SHOOT_TIMER_STEP: f64 = 16.0;
pub const BASE_FIRE_RATE: f64 = 200.0;
pub const PROJECTILE_SPEED: f64 = -5.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Ease the player's centre toward the pointer, then clamp into the field.
pub fn follow_pointer(player: &Player, pointer: (f64, f64)) -> Player {
    let dx = pointer.0 - player.x - PLAYER_SIZE / 2.0;
    let dy = pointer.1 - player.y - PLAYER_SIZE / 2.0;
    Player {
        x: (player.x + dx * FOLLOW_FACTOR).clamp(0.0, FIELD_WIDTH - PLAYER_SIZE),
        y: (player.y + dy * FOLLOW_FACTOR).clamp(0.0, FIELD_HEIGHT - PLAYER_SIZE),
        ..player.clone()
    }
}

/// Shoot-timer threshold for a boost level: 200 at level 0, then
/// `max(50, 200 - level * 30)`.
pub fn fire_rate(boost_level: u8) -> f64 {
    if boost_level == 0 {
        BASE_FIRE_RATE
    } else {
        (BASE_FIRE_RATE - boost_level as f64 * 30.0).max(50.0)
    }
}

/// The (x offset, vx, vy) of every projectile in a boost level's volley.
pub fn volley_pattern(boost_level: u8) -> Vec<(f64, f64, f64)> {
    const V: f64 = PROJECTILE_SPEED;
    match boost_level {
        0 => vec![(0.0, 0.0, V)],
        1 => vec![(-5.0, 0.0, V), (5.0, 0.0, V)],
        2 => vec![(0.0, 0.0, V), (-8.0, -0.5, V), (8.0, 0.5, V)],
        3 => vec![(-10.0, 0.0, V), (-3.0, 0.0, V), (3.0, 0.0, V), (10.0, 0.0, V)],
        4 => vec![
            (0.0, 0.0, V),
            (-12.0, -1.0, V),
            (-6.0, -0.5, V),
            (6.0, 0.5, V),
            (12.0, 1.0, V),
        ],
        _ => {
            let mut shots: Vec<_> = (-2..=2)
                .map(|i| (i as f64 * 8.0, i as f64 * 0.3, V))
                .collect();
            shots.push((-3.0, 0.0, -6.0));
            shots.push((3.0, 0.0, -6.0));
            shots
        }
    }
}

/// Advance the shoot timer; once it passes the rate, emit a volley and
/// restart the timer.  Returns the updated player and any new projectiles.
pub fn fire(player: &Player, boost_level: u8) -> (Player, Vec<Projectile>) {
    let timer = player.shoot_timer + SHOOT_TIMER_STEP;
    if timer <= fire_rate(boost_level) {
        return (
            Player {
                shoot_timer: timer,
                ..player.clone()
            },
            Vec::new(),
        );
    }

    let centre_x = player.x + PLAYER_SIZE / 2.0 - 2.0;
    let volley = volley_pattern(boost_level)
        .into_iter()
        .map(|(dx, vx, vy)| Projectile {
            x: centre_x + dx,
            y: player.y,
            vx,
            vy,
        })
        .collect();

    (
        Player {
            shoot_timer: 0.0,
            ..player.clone()
        },
        volley,
    )
}

// ── Falling / flying entities ─────────────────────────────────────────────────

pub fn step_projectile(p: &Projectile) -> Projectile {
    Projectile {
        x: p.x + p.vx,
        y: p.y + p.vy,
        ..p.clone()
    }
}

pub fn step_enemy(e: &Enemy) -> Enemy {
    Enemy {
        y: e.y + e.speed,
        ..e.clone()
    }
}

pub fn step_power_up(p: &PowerUp) -> PowerUp {
    PowerUp {
        y: p.y + POWER_UP_SPEED,
        bob: p.bob + 0.1,
        ..p.clone()
    }
}

pub fn step_particle(p: &Particle) -> Particle {
    Particle {
        x: p.x + p.vx,
        y: p.y + p.vy,
        vx: p.vx * 0.99,
        vy: p.vy * 0.99,
        life: p.life - p.decay,
        ..p.clone()
    }
}

// ── Pruning predicates ────────────────────────────────────────────────────────

pub fn projectile_alive(p: &Projectile) -> bool {
    p.y >= 0.0
}

pub fn enemy_alive(e: &Enemy) -> bool {
    e.y <= FIELD_HEIGHT
}

pub fn power_up_alive(p: &PowerUp) -> bool {
    p.y <= FIELD_HEIGHT
}

pub fn particle_alive(p: &Particle) -> bool {
    p.life > 0.0
}

/// Step every entity once and keep only the survivors.
pub fn advance_entities(
    projectiles: &[Projectile],
    enemies: &[Enemy],
    power_ups: &[PowerUp],
    particles: &[Particle],
) -> (Vec<Projectile>, Vec<Enemy>, Vec<PowerUp>, Vec<Particle>) {
    (
        projectiles
            .iter()
            .map(step_projectile)
            .filter(projectile_alive)
            .collect(),
        enemies.iter().map(step_enemy).filter(enemy_alive).collect(),
        power_ups
            .iter()
            .map(step_power_up)
            .filter(power_up_alive)
            .collect(),
        particles
            .iter()
            .map(step_particle)
            .filter(particle_alive)
            .collect(),
    )
}
