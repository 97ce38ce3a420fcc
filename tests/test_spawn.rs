use space_fighter::compute::new_session;
use space_fighter::config::SessionConfig;
use space_fighter::entities::*;
use space_fighter::motion::*;
use space_fighter::spawn::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameSession {
    let mut s = new_session(&SessionConfig::default());
    s.phase = Phase::Playing;
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── spawn intervals ───────────────────────────────────────────────────────────

#[test]
fn enemy_interval_shrinks_with_level() {
    assert_eq!(enemy_spawn_interval(1), 450.0);
    assert_eq!(enemy_spawn_interval(4), 300.0);
    assert_eq!(enemy_spawn_interval(8), 100.0);
    assert_eq!(enemy_spawn_interval(30), 100.0);
}

#[test]
fn enemy_spawns_once_timer_exceeds_interval() {
    let mut s = make_state();
    s.enemy_spawn_timer = 440.0;
    advance_spawners(&mut s, 16.0, &mut seeded_rng());

    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemy_spawn_timer, 0.0);
    let e = &s.enemies[0];
    assert_eq!(e.y, -e.size());
    assert!(e.x >= 0.0 && e.x < FIELD_WIDTH - e.size());
}

#[test]
fn enemy_timer_equal_to_interval_does_not_spawn() {
    let mut s = make_state();
    s.enemy_spawn_timer = 434.0;
    advance_spawners(&mut s, 16.0, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert_eq!(s.enemy_spawn_timer, 450.0);
}

#[test]
fn power_up_spawns_every_ten_seconds() {
    let mut s = make_state();
    s.power_up_spawn_timer = 9_990.0;
    advance_spawners(&mut s, 16.0, &mut seeded_rng());

    assert_eq!(s.power_ups.len(), 1);
    assert_eq!(s.power_up_spawn_timer, 0.0);
    let p = &s.power_ups[0];
    assert_eq!(p.y, -POWER_UP_SPAWN_MARGIN);
    assert!(p.x >= 0.0 && p.x < FIELD_WIDTH - POWER_UP_SPAWN_MARGIN);
    assert!(p.bob >= 0.0 && p.bob < std::f64::consts::TAU);
}

#[test]
fn power_up_interval_ignores_level() {
    let mut s = make_state();
    s.level = 9;
    s.power_up_spawn_timer = 5_000.0;
    advance_spawners(&mut s, 16.0, &mut seeded_rng());
    assert!(s.power_ups.is_empty());
}

#[test]
fn random_enemy_uses_level_speed() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let e = random_enemy(3, &mut rng);
        assert!((e.speed - e.kind.speed_at(3)).abs() < 1e-9);
    }
}

#[test]
fn random_kinds_cover_every_variant() {
    let mut rng = seeded_rng();
    let enemies: Vec<_> = (0..300).map(|_| random_enemy(1, &mut rng).kind).collect();
    for kind in EnemyKind::ALL {
        assert!(enemies.contains(&kind));
    }
    let items: Vec<_> = (0..300).map(|_| random_power_up(&mut rng).kind).collect();
    for kind in PowerUpKind::ALL {
        assert!(items.contains(&kind));
    }
}

#[test]
fn explosion_particles_start_fresh() {
    let mut particles = Vec::new();
    explode(&mut particles, 50.0, 60.0, 20, &mut seeded_rng());

    assert_eq!(particles.len(), 20);
    for p in &particles {
        assert_eq!((p.x, p.y), (50.0, 60.0));
        assert_eq!(p.life, 1.0);
        assert!(p.decay >= 0.01 && p.decay < 0.03);
        assert!(p.size >= 2.0 && p.size < 7.0);
        assert!(p.vx.abs() <= 5.0 && p.vy.abs() <= 5.0);
    }
}

// ── player movement ───────────────────────────────────────────────────────────

#[test]
fn player_eases_toward_pointer() {
    let p = Player::new(400.0, 500.0);
    // Pointer 100 units right of the ship's centre.
    let moved = follow_pointer(&p, (530.0, 530.0));
    assert!((moved.x - 410.0).abs() < 1e-9);
    assert!((moved.y - 500.0).abs() < 1e-9);
}

#[test]
fn player_stays_when_pointer_at_centre() {
    let p = Player::new(100.0, 100.0);
    let moved = follow_pointer(&p, (130.0, 130.0));
    assert_eq!(moved, p);
}

#[test]
fn player_is_clamped_into_field() {
    let low = follow_pointer(&Player::new(0.0, 0.0), (-5_000.0, -5_000.0));
    assert_eq!((low.x, low.y), (0.0, 0.0));

    let high = follow_pointer(&Player::new(740.0, 540.0), (50_000.0, 50_000.0));
    assert_eq!((high.x, high.y), (740.0, 540.0));
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn fire_rate_by_boost_level() {
    assert_eq!(fire_rate(0), 200.0);
    assert_eq!(fire_rate(1), 170.0);
    assert_eq!(fire_rate(3), 110.0);
    assert_eq!(fire_rate(5), 50.0);
}

#[test]
fn volley_sizes_by_boost_level() {
    let sizes: Vec<usize> = (0..=5).map(|lvl| volley_pattern(lvl).len()).collect();
    assert_eq!(sizes, vec![1, 2, 3, 4, 5, 7]);
}

#[test]
fn max_volley_has_two_fast_forward_shots() {
    let fast = volley_pattern(5)
        .into_iter()
        .filter(|&(_, vx, vy)| vx == 0.0 && vy == -6.0)
        .count();
    assert_eq!(fast, 2);
}

#[test]
fn fire_waits_for_the_rate() {
    let p = Player { shoot_timer: 100.0, ..Player::new(400.0, 500.0) };
    let (p2, shots) = fire(&p, 0);
    assert!(shots.is_empty());
    assert_eq!(p2.shoot_timer, 116.0);
}

#[test]
fn fire_emits_volley_and_resets_timer() {
    let p = Player { shoot_timer: 190.0, ..Player::new(400.0, 500.0) };
    let (p2, shots) = fire(&p, 0);
    assert_eq!(p2.shoot_timer, 0.0);
    assert_eq!(shots.len(), 1);
    assert_eq!((shots[0].x, shots[0].y), (428.0, 500.0));
    assert_eq!(shots[0].vy, -5.0);
}

#[test]
fn boosted_fire_is_faster() {
    let p = Player { shoot_timer: 160.0, ..Player::new(400.0, 500.0) };
    assert!(fire(&p, 0).1.is_empty());
    assert_eq!(fire(&p, 1).1.len(), 2);
}

// ── entity updates & pruning ──────────────────────────────────────────────────

#[test]
fn entities_step_and_prune() {
    let projectiles = vec![
        Projectile { x: 10.0, y: 2.0, vx: 0.0, vy: -5.0 },
        Projectile { x: 10.0, y: 5.0, vx: 1.0, vy: -5.0 },
    ];
    let enemies = vec![
        Enemy::new(0.0, 599.5, EnemyKind::Basic, 1),
        Enemy::new(100.0, 598.0, EnemyKind::Basic, 1),
    ];
    let power_ups = vec![
        PowerUp { x: 0.0, y: 597.0, kind: PowerUpKind::Bomb, bob: 0.0 },
        PowerUp { x: 0.0, y: 599.0, kind: PowerUpKind::Bomb, bob: 0.0 },
    ];
    let particles = vec![
        Particle { x: 0.0, y: 0.0, vx: 1.0, vy: 1.0, life: 0.01, decay: 0.02, size: 3.0 },
        Particle { x: 0.0, y: 0.0, vx: 1.0, vy: -2.0, life: 1.0, decay: 0.02, size: 3.0 },
    ];

    let (projectiles, enemies, power_ups, particles) =
        advance_entities(&projectiles, &enemies, &power_ups, &particles);

    assert_eq!(projectiles.len(), 1);
    assert_eq!((projectiles[0].x, projectiles[0].y), (11.0, 0.0));

    assert_eq!(enemies.len(), 1);
    assert!((enemies[0].y - 599.2).abs() < 1e-9);

    assert_eq!(power_ups.len(), 1);
    assert_eq!(power_ups[0].y, 599.0);
    assert!((power_ups[0].bob - 0.1).abs() < 1e-9);

    assert_eq!(particles.len(), 1);
    let p = &particles[0];
    assert_eq!((p.x, p.y), (1.0, -2.0));
    assert!((p.vx - 0.99).abs() < 1e-9);
    assert!((p.life - 0.98).abs() < 1e-9);
}
