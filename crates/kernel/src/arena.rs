use std::collections::BTreeMap;
use std::f32::consts::TAU;

use arcadia_ai::{Enemy, EnemyKind, MELEE_ARC_HALF_ANGLE, PlayerVitals, Strike, within_arc};
use arcadia_common::{EntityId, Transform, facing, frame_scale};
use arcadia_input::{ControlFlags, ControlScheme, Edge};
use arcadia_scene::SceneObject;
use glam::Vec3;

use crate::clock::{SimClock, SplitMix64};
use crate::config::ArenaConfig;
use crate::event::SessionEvent;
use crate::frame::Session;

/// Salt separating the id stream from the spawn-placement stream.
const ID_STREAM: u64 = 0x6964_5f73_7472_6561;

fn next_id(ids: &mut SplitMix64) -> EntityId {
    EntityId::from_random_bits(ids.next_u64(), ids.next_u64())
}

/// Melee arena session: the player, the enemy collection and the score.
///
/// Ids come from a stream seeded alongside the spawn RNG, and enemies live
/// in a BTreeMap keyed by id, so AI order (and therefore which strike lands
/// first) is the same on every run with the same seed.
#[derive(Debug, Clone)]
pub struct ArenaSession {
    config: ArenaConfig,
    clock: SimClock,
    rng: SplitMix64,
    ids: SplitMix64,
    player_id: EntityId,
    player_position: Vec3,
    player_heading: f32,
    vitals: PlayerVitals,
    score: u32,
    active: bool,
    enemies: BTreeMap<EntityId, Enemy>,
    swing_trigger: Edge,
    last_swing_at: Option<f64>,
    last_spawn_at: f64,
    wave_pending: bool,
    frame: u64,
    event_log: Vec<SessionEvent>,
}

impl ArenaSession {
    /// Start a session. The initial wave arrives on the first step.
    pub fn new(config: ArenaConfig, max_delta: f32) -> Self {
        let mut ids = SplitMix64::new(config.seed ^ ID_STREAM);
        let player_id = next_id(&mut ids);
        let mut session = Self {
            rng: SplitMix64::new(config.seed),
            ids,
            vitals: PlayerVitals::new(config.player_max_health),
            config,
            clock: SimClock::new(max_delta),
            player_id,
            player_position: Vec3::ZERO,
            player_heading: 0.0,
            score: 0,
            active: true,
            enemies: BTreeMap::new(),
            swing_trigger: Edge::default(),
            last_swing_at: None,
            last_spawn_at: 0.0,
            wave_pending: true,
            frame: 0,
            event_log: Vec::new(),
        };
        let transform = session.player_transform();
        session.event_log.push(SessionEvent::Spawned {
            id: player_id,
            object: SceneObject::Player,
            transform,
        });
        session
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn player_position(&self) -> Vec3 {
        self.player_position
    }

    pub fn player_heading(&self) -> f32 {
        self.player_heading
    }

    pub fn player_health(&self) -> f32 {
        self.vitals.health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_active(&self) -> bool {
        self.active
    }

    pub fn enemies(&self) -> &BTreeMap<EntityId, Enemy> {
        &self.enemies
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.event_log
    }

    fn player_transform(&self) -> Transform {
        Transform::from_heading(self.player_position, self.player_heading)
    }

    /// Place the player directly, e.g. for scripted scenarios.
    pub fn place_player(&mut self, position: Vec3, heading: f32) {
        self.player_position = position;
        self.player_heading = heading;
    }

    /// Add an enemy of `kind` at `position` and return its id.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec3) -> EntityId {
        let id = next_id(&mut self.ids);
        let enemy = Enemy::with_id(id, kind, position);
        tracing::debug!(id = %id.short(), kind = kind.name(), "enemy spawned");
        self.event_log.push(SessionEvent::Spawned {
            id,
            object: SceneObject::Enemy(kind),
            transform: enemy.transform(),
        });
        self.enemies.insert(id, enemy);
        id
    }

    fn spawn_random(&mut self) -> EntityId {
        let angle = self.rng.next_f32() * TAU;
        let ring = self.config.spawn_max_radius - self.config.spawn_min_radius;
        let radius = self.config.spawn_min_radius + ring * self.rng.next_f32();
        let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * radius;
        let kind = EnemyKind::ALL[self.rng.next_index(EnemyKind::ALL.len())];
        self.spawn_enemy(kind, self.player_position + offset)
    }

    /// Swing at everything in range and inside the frontal arc. Returns the
    /// number of enemies hit. Kills are removed and scored immediately.
    pub fn player_attack(&mut self, damage: f32) -> usize {
        if !self.active {
            return 0;
        }
        let targets: Vec<EntityId> = self
            .enemies
            .values()
            .filter(|e| {
                within_arc(
                    self.player_position,
                    self.player_heading,
                    e.position,
                    self.config.melee_range,
                    MELEE_ARC_HALF_ANGLE,
                )
            })
            .map(|e| e.id)
            .collect();

        for id in &targets {
            let Some(enemy) = self.enemies.get_mut(id) else {
                continue;
            };
            let killed = enemy.take_damage(damage);
            self.event_log.push(SessionEvent::EnemyStruck {
                id: *id,
                damage,
                remaining: enemy.health,
            });
            if killed {
                let kind = enemy.kind;
                self.enemies.remove(id);
                self.score += self.config.kill_score;
                tracing::debug!(id = %id.short(), kind = kind.name(), score = self.score, "enemy killed");
                self.event_log.push(SessionEvent::Despawned { id: *id });
                self.event_log.push(SessionEvent::EnemyKilled { id: *id, kind });
                self.event_log.push(SessionEvent::ScoreChanged {
                    score: self.score,
                    delta: self.config.kill_score,
                });
            }
        }
        targets.len()
    }

    /// Deliver an enemy strike to the player. Blocking halves it. Reaching
    /// zero health ends the game until [`ArenaSession::restart`].
    pub fn receive_strike(&mut self, power: f32, blocking: bool) -> f32 {
        if !self.active {
            return 0.0;
        }
        let damage = self.vitals.receive(power, blocking);
        self.event_log.push(SessionEvent::PlayerHealthChanged {
            health: self.vitals.health,
            damage,
            blocked: blocking,
        });
        if self.vitals.is_dead() {
            self.active = false;
            tracing::info!(score = self.score, "game over");
            self.event_log
                .push(SessionEvent::GameOver { score: self.score });
        }
        damage
    }

    /// Reinitialise everything: full health, zero score, empty arena, fresh
    /// clock and RNG. The initial wave is re-armed for the next step.
    ///
    /// The id stream is not rewound, so new ids never repeat the player's
    /// or a despawned enemy's.
    pub fn restart(&mut self) {
        for id in std::mem::take(&mut self.enemies).into_keys() {
            self.event_log.push(SessionEvent::Despawned { id });
        }
        self.vitals = PlayerVitals::new(self.config.player_max_health);
        self.score = 0;
        self.active = true;
        self.clock.reset();
        self.rng = SplitMix64::new(self.config.seed);
        self.player_position = Vec3::ZERO;
        self.player_heading = 0.0;
        self.swing_trigger.reset();
        self.last_swing_at = None;
        self.last_spawn_at = 0.0;
        self.wave_pending = true;
        tracing::info!("arena restarted");
        self.event_log.push(SessionEvent::Restarted);
    }

    /// Advance one frame. A finished game does not advance.
    ///
    /// Events accumulate until drained with [`Session::drain_events`].
    pub fn step(&mut self, flags: &ControlFlags, delta: f32) {
        if !self.active {
            tracing::trace!("game over; frame ignored");
            return;
        }
        let delta = self.clock.advance(delta);
        let now = self.clock.now();

        if self.wave_pending {
            self.wave_pending = false;
            self.last_spawn_at = now;
            for _ in 0..self.config.initial_enemies.min(self.config.max_enemies) {
                self.spawn_random();
            }
        }

        self.move_player(flags, delta);

        if self.swing_trigger.rising(flags.attack) && self.swing_ready(now) {
            self.last_swing_at = Some(now);
            self.player_attack(self.config.melee_damage);
        }

        let strikes: Vec<Strike> = self
            .enemies
            .values_mut()
            .filter_map(|enemy| enemy.think(self.player_position, now, delta))
            .collect();
        for strike in strikes {
            tracing::debug!(enemy = %strike.enemy.short(), power = strike.power, "player struck");
            self.receive_strike(strike.power, flags.block);
            if !self.active {
                break;
            }
        }

        if self.active && now - self.last_spawn_at >= self.config.spawn_interval {
            self.last_spawn_at = now;
            if self.enemies.len() < self.config.max_enemies {
                self.spawn_random();
            }
        }

        self.frame += 1;
        self.event_log.push(SessionEvent::Stepped {
            frame: self.frame,
            time: now,
        });
    }

    fn swing_ready(&self, now: f64) -> bool {
        self.last_swing_at
            .is_none_or(|last| now - last >= self.config.melee_cooldown)
    }

    fn move_player(&mut self, flags: &ControlFlags, delta: f32) {
        let k = frame_scale(delta);
        if flags.left {
            self.player_heading += self.config.player_turn_rate * k;
        }
        if flags.right {
            self.player_heading -= self.config.player_turn_rate * k;
        }
        let mut advance = 0.0;
        if flags.forward {
            advance += 1.0;
        }
        if flags.backward {
            advance -= 1.0;
        }
        self.player_position += facing(self.player_heading) * advance * self.config.player_speed * k;
    }
}

impl Session for ArenaSession {
    const SCHEME: ControlScheme = ControlScheme::Melee;

    fn step(&mut self, flags: &ControlFlags, delta: f32) {
        ArenaSession::step(self, flags, delta);
    }

    fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.event_log)
    }

    fn visible(&self) -> Vec<(EntityId, SceneObject, Transform)> {
        let mut out = Vec::with_capacity(1 + self.enemies.len());
        out.push((self.player_id, SceneObject::Player, self.player_transform()));
        out.extend(
            self.enemies
                .values()
                .map(|e| (e.id, SceneObject::Enemy(e.kind), e.transform())),
        );
        out
    }

    fn now(&self) -> f64 {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcadia_ai::AggroState;

    const DT: f32 = 1.0 / 60.0;

    fn quiet() -> ArenaConfig {
        ArenaConfig {
            initial_enemies: 0,
            spawn_interval: 1.0e9,
            ..ArenaConfig::default()
        }
    }

    #[test]
    fn first_step_brings_initial_wave() {
        let mut s = ArenaSession::new(ArenaConfig::default(), 0.1);
        assert!(s.enemies().is_empty());
        s.step(&ControlFlags::default(), DT);
        assert_eq!(s.enemies().len(), 5);
        for enemy in s.enemies().values() {
            let d = enemy.position.length();
            assert!((20.0 - 1e-3..=30.0 + 1e-3).contains(&d), "spawned at {d}");
        }
    }

    #[test]
    fn timed_spawns_respect_cap() {
        let config = ArenaConfig {
            initial_enemies: 0,
            spawn_interval: 1.0,
            max_enemies: 3,
            ..ArenaConfig::default()
        };
        let mut s = ArenaSession::new(config, 0.1);
        for _ in 0..(60 * 10) {
            s.step(&ControlFlags::default(), DT);
        }
        assert_eq!(s.enemies().len(), 3);
    }

    #[test]
    fn same_seed_same_arena() {
        let mut a = ArenaSession::new(ArenaConfig::default(), 0.1);
        let mut b = ArenaSession::new(ArenaConfig::default(), 0.1);
        a.step(&ControlFlags::default(), DT);
        b.step(&ControlFlags::default(), DT);
        assert_eq!(a.player_id(), b.player_id());
        assert_eq!(a.events(), b.events());
        let ids_a: Vec<EntityId> = a.enemies().keys().copied().collect();
        let ids_b: Vec<EntityId> = b.enemies().keys().copied().collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn simultaneous_strikes_land_in_the_same_order_every_run() {
        let run = || {
            let config = ArenaConfig {
                player_max_health: 25.0,
                ..quiet()
            };
            let mut s = ArenaSession::new(config, 0.1);
            s.spawn_enemy(EnemyKind::Wolf, Vec3::new(1.0, 0.0, 0.0));
            s.spawn_enemy(EnemyKind::Bear, Vec3::new(-1.0, 0.0, 0.0));
            s.step(&ControlFlags::default(), DT);
            s.events()
                .iter()
                .filter_map(|e| match e {
                    SessionEvent::PlayerHealthChanged { damage, health, .. } => {
                        Some((*damage, *health))
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
        };
        let first = run();
        assert!(!first.is_empty());
        for _ in 0..20 {
            assert_eq!(run(), first);
        }
    }

    #[test]
    fn restart_never_reuses_ids() {
        let mut s = ArenaSession::new(quiet(), 0.1);
        let before = s.spawn_enemy(EnemyKind::Deer, Vec3::new(40.0, 0.0, 0.0));
        s.restart();
        let after = s.spawn_enemy(EnemyKind::Deer, Vec3::new(40.0, 0.0, 0.0));
        assert_ne!(before, after);
        assert_ne!(after, s.player_id());
    }

    #[test]
    fn swing_hits_only_the_front_arc() {
        let mut s = ArenaSession::new(quiet(), 0.1);
        let ahead = s.spawn_enemy(EnemyKind::Bear, Vec3::new(0.0, 0.0, 2.0));
        let behind = s.spawn_enemy(EnemyKind::Bear, Vec3::new(0.0, 0.0, -2.0));
        let far = s.spawn_enemy(EnemyKind::Bear, Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(s.player_attack(25.0), 1);
        assert_eq!(s.enemy(ahead).unwrap().health, 75.0);
        assert_eq!(s.enemy(behind).unwrap().health, 100.0);
        assert_eq!(s.enemy(far).unwrap().health, 100.0);
    }

    #[test]
    fn attack_press_swings_once() {
        let mut s = ArenaSession::new(quiet(), 0.1);
        let bear = s.spawn_enemy(EnemyKind::Bear, Vec3::new(0.0, 0.0, 2.0));
        let swing = ControlFlags {
            attack: true,
            ..ControlFlags::default()
        };
        for _ in 0..30 {
            s.step(&swing, DT);
        }
        assert_eq!(s.enemy(bear).unwrap().health, 75.0);
    }

    #[test]
    fn swings_respect_cooldown() {
        let mut s = ArenaSession::new(quiet(), 0.1);
        let bear = s.spawn_enemy(EnemyKind::Bear, Vec3::new(0.0, 0.0, 2.0));
        let swing = ControlFlags {
            attack: true,
            ..ControlFlags::default()
        };
        s.step(&swing, DT);
        s.step(&ControlFlags::default(), DT);
        // Second press 2 frames after the first is inside the cooldown.
        s.step(&swing, DT);
        assert_eq!(s.enemy(bear).unwrap().health, 75.0);
    }

    #[test]
    fn enemy_in_range_wears_the_player_down() {
        let mut s = ArenaSession::new(quiet(), 0.1);
        s.spawn_enemy(EnemyKind::Bear, Vec3::new(0.0, 0.0, 2.0));
        let mut frames = 0;
        while s.is_game_active() && frames < 60 * 30 {
            s.step(&ControlFlags::default(), DT);
            frames += 1;
        }
        assert!(!s.is_game_active());
        assert_eq!(s.player_health(), 0.0);
        let overs = s
            .events()
            .iter()
            .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn finished_game_does_not_advance() {
        let mut s = ArenaSession::new(quiet(), 0.1);
        s.receive_strike(500.0, false);
        assert!(!s.is_game_active());
        let frame = s.frame();
        s.step(&ControlFlags::default(), DT);
        assert_eq!(s.frame(), frame);
        assert_eq!(s.receive_strike(10.0, false), 0.0);
        assert_eq!(s.player_attack(10.0), 0);
    }

    #[test]
    fn deer_runs_from_the_player() {
        let mut s = ArenaSession::new(quiet(), 0.1);
        let deer = s.spawn_enemy(EnemyKind::Deer, Vec3::new(0.0, 0.0, 5.0));
        s.step(&ControlFlags::default(), DT);
        let d = s.enemy(deer).unwrap();
        assert_eq!(d.aggro, AggroState::Flee);
        assert!(d.position.z > 5.0);
    }

    #[test]
    fn player_moves_and_turns() {
        let mut s = ArenaSession::new(quiet(), 0.1);
        let walk = ControlFlags {
            forward: true,
            ..ControlFlags::default()
        };
        s.step(&walk, DT);
        assert!((s.player_position().z - 0.1).abs() < 1e-6);
        let turn = ControlFlags {
            left: true,
            ..ControlFlags::default()
        };
        s.step(&turn, DT);
        assert!((s.player_heading() - 0.05).abs() < 1e-6);
    }
}
