use space_fighter::assets::{AssetStore, Background, Sprite, SpriteImage};
use space_fighter::compute::new_session;
use space_fighter::config::SessionConfig;
use space_fighter::entities::*;
use space_fighter::render::*;

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Fill(Rect, Rgb),
    Image(String, Rect),
    Alpha(f64),
}

/// Records every primitive call in order.
#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, colour: Rgb) {
        self.ops.push(Op::Fill(rect, colour));
    }

    fn draw_image(&mut self, sprite: &Sprite, rect: Rect) {
        self.ops.push(Op::Image(sprite.name.clone(), rect));
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(Op::Alpha(alpha));
    }
}

fn make_state() -> GameSession {
    let mut s = new_session(&SessionConfig::default());
    s.phase = Phase::Playing;
    s
}

fn sprite(name: &str) -> Sprite {
    Sprite::loaded(
        name,
        SpriteImage {
            width: 8,
            height: 8,
            tint: Rgb(10, 20, 30),
        },
    )
}

fn record(state: &GameSession, assets: &AssetStore, background: &Background, now_ms: f64) -> Vec<Op> {
    let mut surface = RecordingSurface::default();
    draw_frame(&mut surface, state, assets, background, now_ms);
    surface.ops
}

/// Ops that follow the clear, the 100 stars and the player.
fn after_player(ops: &[Op]) -> &[Op] {
    let player_end = ops
        .iter()
        .position(|op| *op == Op::Alpha(1.0))
        .expect("player block ends by restoring alpha");
    &ops[player_end + 1..]
}

// ── frame layout ──────────────────────────────────────────────────────────────

#[test]
fn frame_starts_with_full_clear() {
    let ops = record(&make_state(), &AssetStore::default(), &Background::Starfield, 0.0);
    assert_eq!(ops[0], Op::Fill(Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT), C_CLEAR));
}

#[test]
fn starfield_draws_one_hundred_stars() {
    let ops = record(&make_state(), &AssetStore::default(), &Background::Starfield, 0.0);
    // The fallback player's inset shares the star colour, so only the
    // block between the clear and the player counts.
    assert!(ops[1..101].iter().all(|op| matches!(op, Op::Fill(_, c) if *c == C_STAR)));
    assert_eq!(ops[101], Op::Fill(Rect::new(400.0, 500.0, 60.0, 60.0), C_PLAYER_BODY));
}

#[test]
fn stars_stay_inside_field() {
    for now in [0.0, 12_345.0, 1e7] {
        for star in starfield(now) {
            assert!(star.x >= 0.0 && star.x <= FIELD_WIDTH);
            assert!(star.y >= 0.0 && star.y < FIELD_HEIGHT);
            assert!(star.width > 0.0);
        }
    }
}

#[test]
fn empty_session_draws_fallback_player() {
    let ops = record(&make_state(), &AssetStore::default(), &Background::Starfield, 0.0);
    assert_eq!(ops.len(), 1 + 100 + 3 + 1);
    assert_eq!(ops[101], Op::Fill(Rect::new(400.0, 500.0, 60.0, 60.0), C_PLAYER_BODY));
    assert_eq!(ops[102], Op::Fill(Rect::new(405.0, 505.0, 50.0, 50.0), C_PLAYER_INSET));
    assert_eq!(ops[103], Op::Fill(Rect::new(415.0, 515.0, 10.0, 10.0), C_PLAYER_CORE));
    assert_eq!(ops[104], Op::Alpha(1.0));
}

#[test]
fn loaded_player_sprite_is_drawn_as_image() {
    let assets = AssetStore::default().with_sprite(SpriteKey::Player, sprite("player.png"));
    let ops = record(&make_state(), &assets, &Background::Starfield, 0.0);
    assert_eq!(
        ops[101],
        Op::Image("player.png".to_string(), Rect::new(400.0, 500.0, 60.0, 60.0))
    );
    assert_eq!(ops[102], Op::Alpha(1.0));
}

#[test]
fn missing_player_sprite_falls_back() {
    let assets = AssetStore::default().with_sprite(SpriteKey::Player, Sprite::missing("player.png"));
    let ops = record(&make_state(), &assets, &Background::Starfield, 0.0);
    assert!(!ops.iter().any(|op| matches!(op, Op::Image(..))));
    assert_eq!(ops[101], Op::Fill(Rect::new(400.0, 500.0, 60.0, 60.0), C_PLAYER_BODY));
}

// ── invincibility blink ───────────────────────────────────────────────────────

#[test]
fn invincible_player_blinks_on_the_clock() {
    let mut s = make_state();
    s.invincible = true;
    s.invincibility_timer = 2_000.0;

    // sin(1.0) > 0: half alpha before the player.
    let on = record(&s, &AssetStore::default(), &Background::Starfield, 100.0);
    assert_eq!(on[101], Op::Alpha(0.5));
    assert_eq!(on[102], Op::Fill(Rect::new(400.0, 500.0, 60.0, 60.0), C_PLAYER_BODY));

    // sin(4.0) < 0: drawn at full opacity.
    let off = record(&s, &AssetStore::default(), &Background::Starfield, 400.0);
    assert!(!off.contains(&Op::Alpha(0.5)));
}

#[test]
fn vulnerable_player_never_blinks() {
    let ops = record(&make_state(), &AssetStore::default(), &Background::Starfield, 100.0);
    assert!(!ops.contains(&Op::Alpha(0.5)));
}

// ── entities ──────────────────────────────────────────────────────────────────

#[test]
fn collections_drawn_in_order_after_player() {
    let mut s = make_state();
    s.projectiles.push(Projectile { x: 10.0, y: 20.0, vx: 0.0, vy: -5.0 });
    s.enemies.push(Enemy::new(100.0, 100.0, EnemyKind::Heavy, 1));
    s.power_ups.push(PowerUp { x: 200.0, y: 200.0, kind: PowerUpKind::Bomb, bob: 0.0 });
    s.particles.push(Particle { x: 5.0, y: 6.0, vx: 0.0, vy: 0.0, life: 0.4, decay: 0.02, size: 3.0 });

    let ops = record(&s, &AssetStore::default(), &Background::Starfield, 0.0);
    let rest = after_player(&ops);

    assert_eq!(
        rest,
        &[
            Op::Fill(Rect::new(10.0, 20.0, 4.0, 10.0), C_PROJECTILE),
            Op::Fill(Rect::new(100.0, 100.0, 70.0, 70.0), Rgb(0x9f, 0x40, 0xff)),
            Op::Fill(Rect::new(105.0, 105.0, 60.0, 60.0), C_SHADOW),
            Op::Fill(Rect::new(200.0, 200.0, 25.0, 25.0), PowerUpKind::Bomb.colour()),
            Op::Fill(Rect::new(208.0, 208.0, 9.0, 9.0), C_SHADOW),
            Op::Alpha(0.4),
            Op::Fill(Rect::new(5.0, 6.0, 3.0, 3.0), C_SPARK_RED),
            Op::Alpha(1.0),
        ]
    );
}

#[test]
fn enemy_uses_its_kinds_sprite() {
    let mut s = make_state();
    s.enemies.push(Enemy::new(0.0, 0.0, EnemyKind::Fast, 1));
    s.enemies.push(Enemy::new(100.0, 0.0, EnemyKind::Basic, 1));
    let assets = AssetStore::default().with_sprite(SpriteKey::Enemy2, sprite("enemy2.png"));

    let ops = record(&s, &assets, &Background::Starfield, 0.0);
    let rest = after_player(&ops);

    assert_eq!(rest[0], Op::Image("enemy2.png".to_string(), Rect::new(0.0, 0.0, 40.0, 40.0)));
    // Basic wants enemy1.png, which is absent.
    assert_eq!(rest[1], Op::Fill(Rect::new(100.0, 0.0, 50.0, 50.0), Rgb(0xff, 0x6b, 0x6b)));
}

#[test]
fn power_up_bob_is_cosmetic() {
    let mut s = make_state();
    let bob = std::f64::consts::FRAC_PI_2;
    s.power_ups.push(PowerUp { x: 50.0, y: 50.0, kind: PowerUpKind::Weapon, bob });

    let ops = record(&s, &AssetStore::default(), &Background::Starfield, 0.0);
    let rest = after_player(&ops);
    match &rest[0] {
        Op::Fill(rect, colour) => {
            assert!((rect.y - 53.0).abs() < 1e-9);
            assert_eq!(*colour, PowerUpKind::Weapon.colour());
        }
        other => panic!("expected power-up fill, got {other:?}"),
    }
    assert_eq!(s.power_ups[0].bounds().y, 50.0);
}

#[test]
fn particle_colours_alternate() {
    let mut s = make_state();
    for i in 0..3 {
        s.particles.push(Particle {
            x: i as f64,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            life: 1.0,
            decay: 0.02,
            size: 2.0,
        });
    }
    let ops = record(&s, &AssetStore::default(), &Background::Starfield, 0.0);
    let colours: Vec<Rgb> = after_player(&ops)
        .iter()
        .filter_map(|op| match op {
            Op::Fill(_, c) => Some(*c),
            _ => None,
        })
        .collect();
    assert_eq!(colours, vec![C_SPARK_RED, C_SPARK_AMBER, C_SPARK_RED]);
}

// ── backgrounds ───────────────────────────────────────────────────────────────

#[test]
fn image_background_draws_two_stacked_copies() {
    let mut s = make_state();
    s.background = BackgroundId::Image("nebula.png".to_string());
    s.background_y = 120.0;
    let background = Background::Image(sprite("nebula.png"));

    let ops = record(&s, &AssetStore::default(), &background, 0.0);
    assert_eq!(
        ops[1],
        Op::Image("nebula.png".to_string(), Rect::new(0.0, 120.0, FIELD_WIDTH, FIELD_HEIGHT))
    );
    assert_eq!(
        ops[2],
        Op::Image("nebula.png".to_string(), Rect::new(0.0, -480.0, FIELD_WIDTH, FIELD_HEIGHT))
    );
    // Player follows the two copies directly: no stars in between.
    assert_eq!(ops[3], Op::Fill(Rect::new(400.0, 500.0, 60.0, 60.0), C_PLAYER_BODY));
    assert_eq!(ops.len(), 1 + 2 + 3 + 1);
}

#[test]
fn same_inputs_same_calls() {
    let mut s = make_state();
    s.invincible = true;
    s.enemies.push(Enemy::new(30.0, 40.0, EnemyKind::Basic, 2));
    s.particles.push(Particle { x: 1.0, y: 1.0, vx: 0.0, vy: 0.0, life: 0.7, decay: 0.02, size: 2.0 });

    let a = record(&s, &AssetStore::default(), &Background::Starfield, 777.0);
    let b = record(&s, &AssetStore::default(), &Background::Starfield, 777.0);
    assert_eq!(a, b);
}
