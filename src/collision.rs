//! Axis-aligned bounding-box overlap and the per-tick collision passes.

use rand::Rng;
use tracing::{debug, info};

use crate::compute::apply_power_up;
use crate::entities::{Bounds, GameSession, Phase, PersistMode, Rect};
use crate::spawn::{explode, ENEMY_HIT_PARTICLES, PLAYER_HIT_PARTICLES};

/// Invincibility granted after losing a life, in milliseconds.
pub const HIT_INVINCIBILITY_MS: f64 = 2_000.0;

/// Two rectangles overlap iff each one's near edge is strictly before the
/// other's far edge on both axes.  Touching edges do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

pub fn collide(a: &impl Bounds, b: &impl Bounds) -> bool {
    overlaps(&a.bounds(), &b.bounds())
}

/// What happened during one resolution pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    pub enemies_destroyed: usize,
    pub player_hit: bool,
    pub power_ups_collected: usize,
}

/// Run the three collision passes in order, mutating `state` in place.
///
/// 1. projectile × enemy (one enemy per projectile);
/// 2. player × enemy, skipped while invincible, at most one hit;
/// 3. player × power-up.
///
/// Losing the last life switches to `GameOver` and skips pass 3.
pub fn resolve_collisions(state: &mut GameSession, rng: &mut impl Rng) -> CollisionReport {
    let mut report = CollisionReport::default();

    // ── 1. Projectiles ↔ enemies ─────────────────────────────────────────────
    let mut enemy_dead = vec![false; state.enemies.len()];
    let mut projectile_used = vec![false; state.projectiles.len()];

    for (pi, projectile) in state.projectiles.iter().enumerate().rev() {
        let hit = state
            .enemies
            .iter()
            .enumerate()
            .rev()
            .find(|(ei, enemy)| !enemy_dead[*ei] && collide(projectile, *enemy));

        if let Some((ei, enemy)) = hit {
            explode(&mut state.particles, enemy.x, enemy.y, ENEMY_HIT_PARTICLES, rng);
            state.score += enemy.points();
            enemy_dead[ei] = true;
            projectile_used[pi] = true;
            report.enemies_destroyed += 1;
        }
    }

    state.projectiles = retain_unflagged(&state.projectiles, &projectile_used);
    state.enemies = retain_unflagged(&state.enemies, &enemy_dead);

    // ── 2. Player ↔ enemies ──────────────────────────────────────────────────
    if !state.invincible {
        let hit = state
            .enemies
            .iter()
            .enumerate()
            .rev()
            .find(|(_, enemy)| collide(&state.player, *enemy))
            .map(|(i, _)| i);

        if let Some(i) = hit {
            report.player_hit = true;
            state.lives = state.lives.saturating_sub(1);
            state.enemies.remove(i);
            let (px, py) = (state.player.x, state.player.y);
            explode(&mut state.particles, px, py, PLAYER_HIT_PARTICLES, rng);

            if state.persist_mode == PersistMode::Permanent {
                state.boost_level = 0;
                state.boost_timer = 0.0;
            }

            if state.lives == 0 {
                info!(score = state.score, level = state.level, "game over");
                state.phase = Phase::GameOver;
                return report;
            }

            debug!(lives = state.lives, "player hit");
            state.invincible = true;
            state.invincibility_timer = HIT_INVINCIBILITY_MS;
        }
    }

    // ── 3. Player ↔ power-ups ────────────────────────────────────────────────
    let (collected, remaining): (Vec<_>, Vec<_>) = state
        .power_ups
        .drain(..)
        .partition(|p| collide(&state.player, p));
    state.power_ups = remaining;

    for power_up in collected.iter().rev() {
        apply_power_up(state, power_up.kind);
        report.power_ups_collected += 1;
    }

    report
}

fn retain_unflagged<T: Clone>(items: &[T], flagged: &[bool]) -> Vec<T> {
    items
        .iter()
        .zip(flagged)
        .filter(|&(_, &gone)| !gone)
        .map(|(item, _)| item.clone())
        .collect()
}
