use std::collections::BTreeMap;

use arcadia_ai::{AggroState, EnemyKind};
use arcadia_common::EntityId;
use arcadia_kernel::{ArenaSession, DriveSession, Session, SessionEvent};
use glam::Vec3;

/// Session inspector for developer tooling.
///
/// Read-only queries against a running session for debugging and the CLI.
pub struct SessionInspector;

impl SessionInspector {
    /// Summarise the hover-tank session.
    pub fn drive(session: &DriveSession) -> DriveSummary {
        let vehicle = session.vehicle();
        DriveSummary {
            frame: session.frame(),
            time: session.now(),
            position: vehicle.position,
            heading: vehicle.heading,
            speed: vehicle.speed,
            steering_angle: vehicle.steering_angle,
            projectiles: session.projectiles().len(),
            impacts: session.impacts().len(),
        }
    }

    /// Summarise the melee arena.
    pub fn arena(session: &ArenaSession) -> ArenaSummary {
        let mut by_kind = BTreeMap::new();
        for enemy in session.enemies().values() {
            *by_kind.entry(enemy.kind).or_insert(0) += 1;
        }
        ArenaSummary {
            frame: session.frame(),
            time: session.now(),
            health: session.player_health(),
            score: session.score(),
            active: session.is_game_active(),
            player: session.player_position(),
            enemies: session.enemies().len(),
            by_kind,
        }
    }

    pub fn inspect_enemy(session: &ArenaSession, id: EntityId) -> Option<EnemyInfo> {
        let player = session.player_position();
        session.enemy(id).map(|enemy| EnemyInfo {
            id,
            kind: enemy.kind,
            health: enemy.health,
            aggro: enemy.aggro,
            position: enemy.position,
            distance: arcadia_common::planar_distance(enemy.position, player),
        })
    }

    /// Every enemy, nearest first.
    pub fn list_enemies(session: &ArenaSession) -> Vec<EnemyInfo> {
        let mut all: Vec<EnemyInfo> = session
            .enemies()
            .keys()
            .filter_map(|id| Self::inspect_enemy(session, *id))
            .collect();
        all.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        all
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriveSummary {
    pub frame: u64,
    pub time: f64,
    pub position: Vec3,
    pub heading: f32,
    pub speed: f32,
    pub steering_angle: f32,
    pub projectiles: usize,
    pub impacts: usize,
}

impl std::fmt::Display for DriveSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Drive: frame={} t={:.2}s pos=({:.2}, {:.2}, {:.2}) heading={:.3} speed={:.3} steer={:.4} shells={} bursts={}",
            self.frame,
            self.time,
            self.position.x,
            self.position.y,
            self.position.z,
            self.heading,
            self.speed,
            self.steering_angle,
            self.projectiles,
            self.impacts,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArenaSummary {
    pub frame: u64,
    pub time: f64,
    pub health: f32,
    pub score: u32,
    pub active: bool,
    pub player: Vec3,
    pub enemies: usize,
    pub by_kind: BTreeMap<EnemyKind, usize>,
}

impl std::fmt::Display for ArenaSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Arena: frame={} t={:.2}s health={:.0} score={} state={} enemies={}",
            self.frame,
            self.time,
            self.health,
            self.score,
            if self.active { "playing" } else { "game-over" },
            self.enemies,
        )?;
        for (kind, n) in &self.by_kind {
            write!(f, " {}={n}", kind.name())?;
        }
        Ok(())
    }
}

/// Detailed info about a single enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyInfo {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub health: f32,
    pub aggro: AggroState,
    pub position: Vec3,
    /// Planar distance to the player.
    pub distance: f32,
}

impl std::fmt::Display for EnemyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] hp={:.0} {:?} pos=({:.2}, {:.2}) dist={:.2}",
            self.kind.name(),
            self.id.short(),
            self.health,
            self.aggro,
            self.position.x,
            self.position.z,
            self.distance,
        )
    }
}

/// Running count of session events by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTally {
    counts: BTreeMap<&'static str, usize>,
}

impl EventTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &SessionEvent) {
        *self.counts.entry(event.tag()).or_insert(0) += 1;
    }

    pub fn get(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl<'a> Extend<&'a SessionEvent> for EventTally {
    fn extend<I: IntoIterator<Item = &'a SessionEvent>>(&mut self, iter: I) {
        for event in iter {
            self.record(event);
        }
    }
}

impl std::fmt::Display for EventTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Events: total={}", self.total())?;
        for (tag, n) in &self.counts {
            write!(f, " {tag}={n}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcadia_input::ControlFlags;
    use arcadia_kernel::{ArenaConfig, DriveConfig};

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
    fn drive_summary_fresh_session() {
        let session = DriveSession::new(DriveConfig::default(), 0.1);
        let summary = SessionInspector::drive(&session);
        assert_eq!(summary.frame, 0);
        assert_eq!(summary.speed, 0.0);
        assert_eq!(summary.projectiles, 0);
    }

    #[test]
    fn drive_summary_counts_shells() {
        let mut session = DriveSession::new(DriveConfig::default(), 0.1);
        let fire = ControlFlags {
            shoot: true,
            ..ControlFlags::default()
        };
        session.step(&fire, DT);
        let summary = SessionInspector::drive(&session);
        assert_eq!(summary.frame, 1);
        assert_eq!(summary.projectiles, 1);
        assert!(format!("{summary}").contains("shells=1"));
    }

    #[test]
    fn arena_summary_groups_by_kind() {
        let mut session = quiet_arena();
        session.spawn_enemy(EnemyKind::Wolf, Vec3::new(40.0, 0.0, 0.0));
        session.spawn_enemy(EnemyKind::Wolf, Vec3::new(-40.0, 0.0, 0.0));
        session.spawn_enemy(EnemyKind::Deer, Vec3::new(0.0, 0.0, 40.0));

        let summary = SessionInspector::arena(&session);
        assert_eq!(summary.enemies, 3);
        assert_eq!(summary.by_kind.get(&EnemyKind::Wolf), Some(&2));
        assert_eq!(summary.by_kind.get(&EnemyKind::Bear), None);
        let text = format!("{summary}");
        assert!(text.contains("state=playing"));
        assert!(text.contains("wolf=2"));
        assert!(text.contains("deer=1"));
    }

    #[test]
    fn enemies_listed_nearest_first() {
        let mut session = quiet_arena();
        let far = session.spawn_enemy(EnemyKind::Bear, Vec3::new(0.0, 0.0, 30.0));
        let near = session.spawn_enemy(EnemyKind::Deer, Vec3::new(5.0, 0.0, 0.0));
        let ids: Vec<EntityId> = SessionInspector::list_enemies(&session)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![near, far]);

        let info = SessionInspector::inspect_enemy(&session, near).unwrap();
        assert_eq!(info.distance, 5.0);
        assert_eq!(info.health, 30.0);
        assert!(SessionInspector::inspect_enemy(&session, EntityId::new()).is_none());
    }

    #[test]
    fn tally_counts_by_tag() {
        let mut session = quiet_arena();
        session.spawn_enemy(EnemyKind::Deer, Vec3::new(0.0, 0.0, 1.0));
        session.player_attack(30.0);
        session.step(&ControlFlags::default(), DT);

        let mut tally = EventTally::new();
        tally.extend(session.events());
        assert_eq!(tally.get("enemy_killed"), 1);
        assert_eq!(tally.get("score_changed"), 1);
        assert_eq!(tally.get("stepped"), 1);
        assert_eq!(tally.get("game_over"), 0);
        assert_eq!(tally.total(), session.events().len());
        assert!(format!("{tally}").contains("enemy_killed=1"));
    }
}
