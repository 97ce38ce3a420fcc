//! The rendering boundary.
//!
//! `draw_frame` turns a session into a fixed sequence of primitive calls on
//! any `Surface`: clear, background, player, projectiles, enemies, power-ups,
//! particles.  Given the same session, assets and clock it always issues the
//! same calls.

use crate::assets::{AssetStore, Background, Sprite};
use crate::entities::{
    Bounds, Enemy, GameSession, Particle, PowerUp, Projectile, Rect, SpriteKey, FIELD_HEIGHT,
    FIELD_WIDTH, PLAYER_SIZE, POWER_UP_SIZE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_CLEAR: Rgb = Rgb(0x00, 0x00, 0x11);
pub const C_STAR: Rgb = Rgb(0xff, 0xff, 0xff);
pub const C_PLAYER_BODY: Rgb = Rgb(0x4a, 0x9e, 0xff);
pub const C_PLAYER_INSET: Rgb = Rgb(0xff, 0xff, 0xff);
pub const C_PLAYER_CORE: Rgb = Rgb(0xff, 0x6b, 0x6b);
pub const C_PROJECTILE: Rgb = Rgb(0xff, 0xff, 0x00);
pub const C_SHADOW: Rgb = Rgb(0x00, 0x00, 0x00);
pub const C_SPARK_RED: Rgb = Rgb(0xff, 0x6b, 0x6b);
pub const C_SPARK_AMBER: Rgb = Rgb(0xff, 0xaa, 0x00);

const STAR_COUNT: usize = 100;
/// Alpha used on the "off" beat of the invincibility blink.
const BLINK_ALPHA: f64 = 0.5;

/// A drawing target that accepts primitive operations.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, colour: Rgb);
    fn draw_image(&mut self, sprite: &Sprite, rect: Rect);
    /// Opacity applied to subsequent operations, in [0, 1].
    fn set_alpha(&mut self, alpha: f64);
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `now_ms` drives the starfield drift and the
/// invincibility blink.
pub fn draw_frame<S: Surface>(
    surface: &mut S,
    state: &GameSession,
    assets: &AssetStore,
    background: &Background,
    now_ms: f64,
) {
    surface.fill_rect(Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT), C_CLEAR);
    draw_background(surface, background, state.background_y, now_ms);

    let blink = state.invincible && (now_ms * 0.01).sin() > 0.0;
    draw_player(surface, state, assets.drawable(SpriteKey::Player), blink);

    for projectile in &state.projectiles {
        draw_projectile(surface, projectile);
    }
    for enemy in &state.enemies {
        draw_enemy(surface, enemy, assets.drawable(enemy.kind.profile().sprite));
    }
    for power_up in &state.power_ups {
        draw_power_up(surface, power_up);
    }
    for (i, particle) in state.particles.iter().enumerate() {
        draw_particle(surface, particle, i);
    }
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_background<S: Surface>(surface: &mut S, background: &Background, scroll_y: f64, now_ms: f64) {
    match background {
        Background::Image(sprite) => {
            // Two stacked copies make the scroll wrap seamlessly.
            surface.draw_image(sprite, Rect::new(0.0, scroll_y, FIELD_WIDTH, FIELD_HEIGHT));
            surface.draw_image(
                sprite,
                Rect::new(0.0, scroll_y - FIELD_HEIGHT, FIELD_WIDTH, FIELD_HEIGHT),
            );
        }
        Background::Starfield => {
            for star in starfield(now_ms) {
                surface.fill_rect(star, C_STAR);
            }
        }
    }
}

/// Star rectangles at time `now_ms`.
pub fn starfield(now_ms: f64) -> impl Iterator<Item = Rect> {
    (0..STAR_COUNT).map(move |i| {
        let i = i as f64;
        let x = (i * 0.1).sin() * 400.0 + 400.0;
        let y = (i * 6.0 + now_ms * 0.01).rem_euclid(FIELD_HEIGHT);
        let size = (i.sin() * 2.0 + 1.0).abs();
        Rect::new(x, y, size, size)
    })
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<S: Surface>(surface: &mut S, state: &GameSession, sprite: Option<&Sprite>, blink: bool) {
    if blink {
        surface.set_alpha(BLINK_ALPHA);
    }

    let body = state.player.bounds();
    match sprite {
        Some(sprite) => surface.draw_image(sprite, body),
        None => {
            surface.fill_rect(body, C_PLAYER_BODY);
            surface.fill_rect(
                Rect::new(body.x + 5.0, body.y + 5.0, PLAYER_SIZE - 10.0, PLAYER_SIZE - 10.0),
                C_PLAYER_INSET,
            );
            surface.fill_rect(Rect::new(body.x + 15.0, body.y + 15.0, 10.0, 10.0), C_PLAYER_CORE);
        }
    }

    surface.set_alpha(1.0);
}

fn draw_projectile<S: Surface>(surface: &mut S, projectile: &Projectile) {
    surface.fill_rect(projectile.bounds(), C_PROJECTILE);
}

fn draw_enemy<S: Surface>(surface: &mut S, enemy: &Enemy, sprite: Option<&Sprite>) {
    let rect = enemy.bounds();
    match sprite {
        Some(sprite) => surface.draw_image(sprite, rect),
        None => {
            surface.fill_rect(rect, enemy.kind.profile().colour);
            surface.fill_rect(
                Rect::new(rect.x + 5.0, rect.y + 5.0, rect.width - 10.0, rect.height - 10.0),
                C_SHADOW,
            );
        }
    }
}

/// Power-ups bob ±3 units around their true position.  The bob is cosmetic;
/// pickup uses the unbobbed box.
fn draw_power_up<S: Surface>(surface: &mut S, power_up: &PowerUp) {
    let y = power_up.y + power_up.bob.sin() * 3.0;
    surface.fill_rect(
        Rect::new(power_up.x, y, POWER_UP_SIZE, POWER_UP_SIZE),
        power_up.kind.colour(),
    );
    surface.fill_rect(Rect::new(power_up.x + 8.0, y + 8.0, 9.0, 9.0), C_SHADOW);
}

fn draw_particle<S: Surface>(surface: &mut S, particle: &Particle, index: usize) {
    let colour = if index % 2 == 0 {
        C_SPARK_RED
    } else {
        C_SPARK_AMBER
    };
    surface.set_alpha(particle.life.clamp(0.0, 1.0));
    surface.fill_rect(
        Rect::new(particle.x, particle.y, particle.size, particle.size),
        colour,
    );
    surface.set_alpha(1.0);
}
