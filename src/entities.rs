//! Game entity types: plain data plus per-kind attribute tables.
//!
//! Per-kind attributes live in small tables (`EnemyKind::profile`,
//! `PowerUpKind::colour`) so adding a kind is a compile-checked change.

use crate::render::Rgb;

// ── Play-field geometry ───────────────────────────────────────────────────────

pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 600.0;

pub const PLAYER_SIZE: f64 = 60.0;
pub const PLAYER_START: (f64, f64) = (400.0, 500.0);
pub const POINTER_START: (f64, f64) = (400.0, 300.0);

pub const PROJECTILE_WIDTH: f64 = 4.0;
pub const PROJECTILE_HEIGHT: f64 = 10.0;

pub const POWER_UP_SIZE: f64 = 25.0;
pub const POWER_UP_SPEED: f64 = 2.0;

pub const MAX_BOOST_LEVEL: u8 = 5;
pub const STARTING_LIVES: u32 = 3;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Anything that occupies an axis-aligned box on the field.
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

// ── Session-level enums ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Whether weapon boosts decay only on life loss or also over time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersistMode {
    #[default]
    Permanent,
    Timed,
}

/// Background selection. Affects rendering only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BackgroundId {
    #[default]
    Starfield,
    /// An image file name, resolved against the background directory.
    Image(String),
}

impl BackgroundId {
    /// `"default"` (or an empty name) selects the starfield.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "" | "default" => Self::Starfield,
            other => Self::Image(other.to_string()),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Starfield)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Player,
    Enemy1,
    Enemy2,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Fast,
    Heavy,
}

/// Fixed attributes selected by an enemy's kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyProfile {
    pub size: f64,
    pub base_speed: f64,
    pub speed_per_level: f64,
    pub points: u32,
    pub sprite: SpriteKey,
    pub colour: Rgb,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Heavy];

    pub const fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Basic => EnemyProfile {
                size: 50.0,
                base_speed: 1.0,
                speed_per_level: 0.2,
                points: 10,
                sprite: SpriteKey::Enemy1,
                colour: Rgb(0xff, 0x6b, 0x6b),
            },
            EnemyKind::Fast => EnemyProfile {
                size: 40.0,
                base_speed: 2.0,
                speed_per_level: 0.3,
                points: 20,
                sprite: SpriteKey::Enemy2,
                colour: Rgb(0xff, 0x9f, 0x40),
            },
            EnemyKind::Heavy => EnemyProfile {
                size: 70.0,
                base_speed: 0.5,
                speed_per_level: 0.1,
                points: 30,
                sprite: SpriteKey::Enemy1,
                colour: Rgb(0x9f, 0x40, 0xff),
            },
        }
    }

    /// Falling speed (units per tick) for an enemy spawned at `level`.
    pub fn speed_at(self, level: u32) -> f64 {
        let p = self.profile();
        p.base_speed + level as f64 * p.speed_per_level
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub kind: EnemyKind,
    /// Fixed at spawn time from the kind and the level back then.
    pub speed: f64,
}

impl Enemy {
    pub fn new(x: f64, y: f64, kind: EnemyKind, level: u32) -> Self {
        Self {
            x,
            y,
            kind,
            speed: kind.speed_at(level),
        }
    }

    pub fn size(&self) -> f64 {
        self.kind.profile().size
    }

    pub fn points(&self) -> u32 {
        self.kind.profile().points
    }
}

impl Bounds for Enemy {
    fn bounds(&self) -> Rect {
        let s = self.size();
        Rect::new(self.x, self.y, s, s)
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Raises the weapon boost level by one (max 5).
    Weapon,
    /// Five seconds of invincibility.
    Invincibility,
    /// One bomb for the player's stock.
    Bomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Weapon,
        PowerUpKind::Invincibility,
        PowerUpKind::Bomb,
    ];

    pub const fn colour(self) -> Rgb {
        match self {
            PowerUpKind::Weapon => Rgb(0xff, 0xff, 0x00),
            PowerUpKind::Invincibility => Rgb(0x00, 0xff, 0x00),
            PowerUpKind::Bomb => Rgb(0xff, 0x88, 0x00),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f64,
    pub y: f64,
    pub kind: PowerUpKind,
    /// Phase of the vertical bob animation, in radians.
    pub bob: f64,
}

impl Bounds for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }
}

// ── Projectiles & particles ───────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Bounds for Projectile {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// A purely visual explosion fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Remaining life, 1.0 at birth; removed once it reaches 0.
    pub life: f64,
    pub decay: f64,
    pub size: f64,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    /// Accumulates 16 per tick; fires once it passes the current rate.
    pub shoot_timer: f64,
}

impl Player {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            shoot_timer: 0.0,
        }
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub phase: Phase,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub bombs: u32,
    pub boost_level: u8,
    pub persist_mode: PersistMode,
    /// Remaining time (ms) of the current boost level; `Timed` mode only.
    pub boost_timer: f64,
    pub invincible: bool,
    pub invincibility_timer: f64,
    pub enemy_spawn_timer: f64,
    pub power_up_spawn_timer: f64,
    /// Latest known pointer position in field coordinates.
    pub pointer: (f64, f64),
    pub background: BackgroundId,
    /// Vertical scroll offset of an image background, in [0, 600).
    pub background_y: f64,
    pub frame: u64,
}
