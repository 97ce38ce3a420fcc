//! Session transitions and the per-frame tick.
//!
//! Transitions read a `&GameSession` and hand back the next one; the only
//! outside effect is drawing from the caller's RNG.

use rand::Rng;
use tracing::{debug, info};

use crate::collision::resolve_collisions;
use crate::config::SessionConfig;
use crate::entities::{
    GameSession, Phase, PersistMode, Player, PowerUpKind, FIELD_HEIGHT, MAX_BOOST_LEVEL,
    PLAYER_START, POINTER_START, STARTING_LIVES,
};
use crate::motion::{advance_entities, fire, follow_pointer};
use crate::spawn::{advance_spawners, explode, BOMB_PARTICLES};

pub const BOOST_LEVEL_MS: f64 = 15_000.0;
pub const INVINCIBILITY_POWER_UP_MS: f64 = 5_000.0;
pub const BOMB_SCORE: u32 = 50;
pub const BOMB_CENTRE: (f64, f64) = (400.0, 300.0);
pub const LEVEL_SCORE_STEP: u32 = 1_000;
/// Image-background scroll speed in field units per millisecond.
pub const BACKGROUND_SPEED: f64 = 0.03;

/// Everything the host hands to one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Latest pointer position, if it moved since the last frame.
    pub pointer: Option<(f64, f64)>,
    pub use_bomb: bool,
    pub toggle_pause: bool,
}

// ── Constructors & session control ──────────────────────────────────────────

fn fresh_session(config: &SessionConfig, phase: Phase) -> GameSession {
    GameSession {
        phase,
        player: Player::new(PLAYER_START.0, PLAYER_START.1),
        projectiles: Vec::new(),
        enemies: Vec::new(),
        power_ups: Vec::new(),
        particles: Vec::new(),
        score: 0,
        level: 1,
        lives: STARTING_LIVES,
        bombs: 0,
        boost_level: 0,
        persist_mode: config.persist_mode,
        boost_timer: 0.0,
        invincible: false,
        invincibility_timer: 0.0,
        enemy_spawn_timer: 0.0,
        power_up_spawn_timer: 0.0,
        pointer: POINTER_START,
        background: config.background.clone(),
        background_y: 0.0,
        frame: 0,
    }
}

/// The session shown behind the main menu before anything is played.
pub fn new_session(config: &SessionConfig) -> GameSession {
    fresh_session(config, Phase::Menu)
}

/// Begin a new game.  Collections and the player are replaced wholesale;
/// the pointer position carries over.
pub fn start(state: &GameSession, config: &SessionConfig) -> GameSession {
    info!(mode = ?config.persist_mode, background = ?config.background, "session started");
    GameSession {
        pointer: state.pointer,
        ..fresh_session(config, Phase::Playing)
    }
}

/// Start again with the same persist mode and background.
pub fn restart(state: &GameSession) -> GameSession {
    let config = SessionConfig {
        persist_mode: state.persist_mode,
        background: state.background.clone(),
    };
    start(state, &config)
}

pub fn pause(state: &GameSession) -> GameSession {
    if state.phase != Phase::Playing {
        return state.clone();
    }
    GameSession {
        phase: Phase::Paused,
        ..state.clone()
    }
}

pub fn resume(state: &GameSession) -> GameSession {
    if state.phase != Phase::Paused {
        return state.clone();
    }
    GameSession {
        phase: Phase::Playing,
        ..state.clone()
    }
}

pub fn return_to_menu(state: &GameSession) -> GameSession {
    GameSession {
        phase: Phase::Menu,
        ..state.clone()
    }
}

fn toggle_pause(state: &GameSession) -> GameSession {
    match state.phase {
        Phase::Playing => pause(state),
        Phase::Paused => resume(state),
        _ => state.clone(),
    }
}

// ── Player actions & power-ups ───────────────────────────────────────────────

/// Detonate a bomb: clears every enemy for a flat bonus.  Enemies cleared
/// this way award no individual points.  Without a bomb, or outside play,
/// nothing changes.
pub fn use_bomb(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    if state.bombs == 0 || state.phase != Phase::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    next.bombs -= 1;
    explode(
        &mut next.particles,
        BOMB_CENTRE.0,
        BOMB_CENTRE.1,
        BOMB_PARTICLES,
        rng,
    );
    debug!(cleared = next.enemies.len(), bombs_left = next.bombs, "bomb used");
    next.enemies.clear();
    next.score += BOMB_SCORE;
    next
}

pub fn apply_power_up(state: &mut GameSession, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Weapon => {
            state.boost_level = (state.boost_level + 1).min(MAX_BOOST_LEVEL);
            if state.persist_mode == PersistMode::Timed {
                state.boost_timer = BOOST_LEVEL_MS;
            }
        }
        PowerUpKind::Invincibility => {
            // Overwrites whatever remains of a post-hit grace period.
            state.invincible = true;
            state.invincibility_timer = INVINCIBILITY_POWER_UP_MS;
        }
        PowerUpKind::Bomb => {
            state.bombs += 1;
        }
    }
    debug!(?kind, boost = state.boost_level, bombs = state.bombs, "power-up collected");
}

// ── Timers & progression ────────────────────────────────────────────────────

/// Missing, non-finite or negative deltas count as zero elapsed time.
pub fn sanitize_dt(dt: Option<f64>) -> f64 {
    match dt {
        Some(ms) if ms.is_finite() && ms > 0.0 => ms,
        _ => 0.0,
    }
}

/// Tick the weapon-boost and invincibility countdowns.
///
/// A timed boost loses exactly one level per expiry; the next level gets a
/// fresh 15 s, so levels decay one after another.
pub fn advance_timers(state: &mut GameSession, dt: f64) {
    if state.boost_level > 0 && state.persist_mode == PersistMode::Timed {
        state.boost_timer -= dt;
        if state.boost_timer <= 0.0 {
            state.boost_level -= 1;
            if state.boost_level > 0 {
                state.boost_timer = BOOST_LEVEL_MS;
            }
            debug!(boost = state.boost_level, "weapon boost decayed");
        }
    }

    if state.invincible {
        state.invincibility_timer -= dt;
        if state.invincibility_timer <= 0.0 {
            state.invincible = false;
        }
    }
}

/// Raise the level by one if the score has passed `level * 1000`.  Larger
/// jumps are caught up one level per tick.
pub fn check_level_up(state: &mut GameSession) {
    if state.score > state.level * LEVEL_SCORE_STEP {
        state.level += 1;
        info!(level = state.level, score = state.score, "level up");
    }
}

fn scroll_background(state: &mut GameSession, dt: f64) {
    if state.background.is_default() {
        return;
    }
    state.background_y += BACKGROUND_SPEED * dt;
    if state.background_y >= FIELD_HEIGHT {
        state.background_y = 0.0;
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Pause toggles and pointer movement are applied in any phase; everything
/// else only while `Playing`.  All randomness comes through `rng` so callers
/// control determinism (tests use a seeded RNG).
pub fn tick(
    state: &GameSession,
    input: &FrameInput,
    dt: Option<f64>,
    rng: &mut impl Rng,
) -> GameSession {
    let mut next = if input.toggle_pause {
        toggle_pause(state)
    } else {
        state.clone()
    };
    if let Some(pointer) = input.pointer {
        next.pointer = pointer;
    }
    if next.phase != Phase::Playing {
        return next;
    }

    if input.use_bomb {
        next = use_bomb(&next, rng);
    }

    let dt = sanitize_dt(dt);

    // ── 1. Background & player ───────────────────────────────────────────────
    scroll_background(&mut next, dt);
    next.player = follow_pointer(&next.player, next.pointer);

    // ── 2. Power-up timers ───────────────────────────────────────────────────
    advance_timers(&mut next, dt);

    // ── 3. Firing ────────────────────────────────────────────────────────────
    let (player, volley) = fire(&next.player, next.boost_level);
    next.player = player;
    next.projectiles.extend(volley);

    // ── 4. Spawning ──────────────────────────────────────────────────────────
    advance_spawners(&mut next, dt, rng);

    // ── 5. Move & prune ──────────────────────────────────────────────────────
    let (projectiles, enemies, power_ups, particles) = advance_entities(
        &next.projectiles,
        &next.enemies,
        &next.power_ups,
        &next.particles,
    );
    next.projectiles = projectiles;
    next.enemies = enemies;
    next.power_ups = power_ups;
    next.particles = particles;

    // ── 6. Collisions ────────────────────────────────────────────────────────
    resolve_collisions(&mut next, rng);

    // ── 7. Level progression ─────────────────────────────────────────────────
    check_level_up(&mut next);

    next.frame += 1;
    next
}

// ── Derived display state ───────────────────────────────────────────────────

/// Weapon boost indicator: level plus seconds left (`None` when permanent).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoostIndicator {
    pub level: u8,
    pub seconds_left: Option<u32>,
}

/// Values shown on the heads-up display, derived from a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub bombs: u32,
    pub boost: Option<BoostIndicator>,
    pub invincible_seconds: Option<u32>,
}

fn whole_seconds(ms: f64) -> u32 {
    (ms / 1000.0).ceil().max(0.0) as u32
}

impl Hud {
    pub fn from_session(state: &GameSession) -> Self {
        let boost = (state.boost_level > 0).then(|| BoostIndicator {
            level: state.boost_level,
            seconds_left: match state.persist_mode {
                PersistMode::Permanent => None,
                PersistMode::Timed => Some(whole_seconds(state.boost_timer)),
            },
        });
        Self {
            score: state.score,
            level: state.level,
            lives: state.lives,
            bombs: state.bombs,
            boost,
            invincible_seconds: state
                .invincible
                .then(|| whole_seconds(state.invincibility_timer)),
        }
    }

    pub fn boost_label(&self) -> Option<String> {
        self.boost.as_ref().map(|b| match b.seconds_left {
            None => format!("x{} (permanent)", b.level),
            Some(secs) => format!("x{} ({secs}s)", b.level),
        })
    }
}
