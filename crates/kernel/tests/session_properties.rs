//! End-to-end behaviour of the two sessions through their public API.

use arcadia_ai::{ATTACK_COOLDOWN, AggroState, EnemyKind};
use arcadia_input::ControlFlags;
use arcadia_kernel::{ArenaConfig, ArenaSession, DriveConfig, DriveSession, SessionEvent};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

fn quiet_arena() -> ArenaSession {
    ArenaSession::new(
        ArenaConfig {
            initial_enemies: 0,
            spawn_interval: 1.0e9,
            ..ArenaConfig::default()
        },
        0.1,
    )
}

#[test]
fn enemy_dies_once_and_scores_once() {
    let mut arena = quiet_arena();
    let wolf = arena.spawn_enemy(EnemyKind::Wolf, Vec3::new(0.0, 0.0, 1.5));
    assert_eq!(arena.enemy(wolf).unwrap().health, 50.0);

    assert_eq!(arena.player_attack(20.0), 1);
    assert_eq!(arena.enemy(wolf).unwrap().health, 30.0);
    assert_eq!(arena.player_attack(30.0), 1);
    assert!(arena.enemy(wolf).is_none());

    let events = arena.events();
    let remaining: Vec<f32> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::EnemyStruck { id, remaining, .. } if *id == wolf => Some(*remaining),
            _ => None,
        })
        .collect();
    assert_eq!(remaining, vec![30.0, 0.0]);

    let deaths = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::EnemyKilled { id, .. } if *id == wolf))
        .count();
    assert_eq!(deaths, 1);

    let increments: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::ScoreChanged { delta, .. } => Some(*delta),
            _ => None,
        })
        .collect();
    assert_eq!(increments, vec![10]);
    assert_eq!(arena.score(), 10);

    // Swinging at the empty spot changes nothing.
    assert_eq!(arena.player_attack(30.0), 0);
    assert_eq!(arena.score(), 10);
}

#[test]
fn unblocked_then_blocked_hit() {
    let mut arena = quiet_arena();
    assert_eq!(arena.player_health(), 100.0);
    assert_eq!(arena.receive_strike(20.0, false), 20.0);
    assert_eq!(arena.receive_strike(20.0, true), 10.0);
    assert_eq!(arena.player_health(), 70.0);
    assert!(arena.is_game_active());
}

#[test]
fn block_flag_halves_live_strikes() {
    let mut arena = quiet_arena();
    arena.spawn_enemy(EnemyKind::Wolf, Vec3::new(0.0, 0.0, 1.0));
    let blocking = ControlFlags {
        block: true,
        ..ControlFlags::default()
    };
    arena.step(&blocking, DT);
    assert_eq!(arena.player_health(), 95.0);
}

#[test]
fn restart_resets_everything() {
    let mut arena = ArenaSession::new(ArenaConfig::default(), 0.1);
    arena.step(&ControlFlags::default(), DT);
    let wolf = arena.spawn_enemy(EnemyKind::Wolf, Vec3::new(0.0, 0.0, 1.0));
    arena.player_attack(50.0);
    assert!(arena.enemy(wolf).is_none());
    arena.receive_strike(1000.0, false);
    assert!(!arena.is_game_active());
    assert!(!arena.enemies().is_empty());

    arena.restart();
    assert_eq!(arena.player_health(), 100.0);
    assert_eq!(arena.score(), 0);
    assert!(arena.is_game_active());
    assert!(arena.enemies().is_empty());
    assert!(arena.events().contains(&SessionEvent::Restarted));
}

#[test]
fn enemy_strikes_are_a_cooldown_apart() {
    let mut arena = ArenaSession::new(
        ArenaConfig {
            initial_enemies: 0,
            spawn_interval: 1.0e9,
            player_max_health: 1.0e6,
            ..ArenaConfig::default()
        },
        0.1,
    );
    arena.spawn_enemy(EnemyKind::Bear, Vec3::new(1.0, 0.0, 0.0));
    arena.spawn_enemy(EnemyKind::Wolf, Vec3::new(-1.0, 0.0, 0.0));

    let mut times: Vec<(f32, f64)> = Vec::new();
    let mut now = 0.0;
    for _ in 0..(60 * 12) {
        arena.step(&ControlFlags::default(), DT);
        now += DT as f64;
        for e in arena.events() {
            if let SessionEvent::PlayerHealthChanged { damage, .. } = e {
                times.push((*damage, now));
            }
        }
        // Drain so each frame's events are seen once.
        let _ = arcadia_kernel::Session::drain_events(&mut arena);
    }

    for power in [10.0, 20.0] {
        let hits: Vec<f64> = times
            .iter()
            .filter(|(d, _)| *d == power)
            .map(|(_, t)| *t)
            .collect();
        assert!(hits.len() >= 10, "{power}: {} hits", hits.len());
        for pair in hits.windows(2) {
            assert!(pair[1] - pair[0] >= ATTACK_COOLDOWN - 1e-9);
        }
    }
}

#[test]
fn predator_in_band_chases_and_deer_flees() {
    let mut arena = quiet_arena();
    let wolf = arena.spawn_enemy(EnemyKind::Wolf, Vec3::new(10.0, 0.0, 0.0));
    let bear = arena.spawn_enemy(EnemyKind::Bear, Vec3::new(0.0, 0.0, -11.0));
    let deer = arena.spawn_enemy(EnemyKind::Deer, Vec3::new(-6.0, 0.0, 0.0));
    arena.step(&ControlFlags::default(), DT);
    assert_eq!(arena.enemy(wolf).unwrap().aggro, AggroState::Chase);
    assert_eq!(arena.enemy(bear).unwrap().aggro, AggroState::Chase);
    assert_eq!(arena.enemy(deer).unwrap().aggro, AggroState::Flee);
}

#[test]
fn idle_tank_at_rest_stays_put() {
    let mut config = DriveConfig::default();
    config.vehicle.hover = None;
    config.start_position = Vec3::new(4.0, 0.0, 4.0);
    let mut drive = DriveSession::new(config, 0.1);
    for _ in 0..600 {
        drive.step(&ControlFlags::default(), DT);
    }
    assert_eq!(drive.vehicle().position, Vec3::new(4.0, 0.0, 4.0));
}

#[test]
fn tank_bounds_hold_over_a_long_drive() {
    let mut drive = DriveSession::new(DriveConfig::default(), 0.1);
    let params = drive.config().vehicle;
    let pattern = [
        (true, false, true, false),
        (true, false, false, true),
        (false, true, true, false),
        (false, false, false, false),
        (false, true, false, true),
    ];
    for (i, (forward, backward, left, right)) in pattern.iter().cycle().take(3000).enumerate() {
        let flags = ControlFlags {
            forward: *forward,
            backward: *backward,
            left: *left,
            right: *right,
            shoot: i % 40 == 0,
            ..ControlFlags::default()
        };
        // Every eleventh frame is a long one that hits the delta cap.
        let delta = if i % 11 == 0 { 0.25 } else { DT };
        drive.step(&flags, delta);
        let v = drive.vehicle();
        assert!(v.speed <= params.max_speed);
        assert!(v.speed >= -params.max_speed * 0.5);
        assert!(v.steering_angle.abs() <= params.max_steering_angle);
    }
}
