use arcadia_ai::EnemyKind;
use arcadia_common::{EntityId, Transform};
use arcadia_scene::SceneObject;
use glam::Vec3;

/// A record produced by every observable change in a session.
///
/// Spawn/despawn records drive the scene boundary; the rest are the discrete
/// game outputs (score, health, game over, restart) a HUD listens to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A visual object appeared.
    Spawned {
        id: EntityId,
        object: SceneObject,
        transform: Transform,
    },
    /// A visual object went away.
    Despawned { id: EntityId },
    /// The hover tank fired a shell with this id.
    ShotFired { id: EntityId },
    ProjectileLanded { id: EntityId, at: Vec3 },
    ProjectileExpired { id: EntityId },
    /// The player's swing hit an enemy.
    EnemyStruck {
        id: EntityId,
        damage: f32,
        remaining: f32,
    },
    EnemyKilled { id: EntityId, kind: EnemyKind },
    ScoreChanged { score: u32, delta: u32 },
    PlayerHealthChanged {
        health: f32,
        damage: f32,
        blocked: bool,
    },
    GameOver { score: u32 },
    Restarted,
    /// The session advanced one frame.
    Stepped { frame: u64, time: f64 },
}

impl SessionEvent {
    /// Short tag used by tallies and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            SessionEvent::Spawned { .. } => "spawned",
            SessionEvent::Despawned { .. } => "despawned",
            SessionEvent::ShotFired { .. } => "shot_fired",
            SessionEvent::ProjectileLanded { .. } => "projectile_landed",
            SessionEvent::ProjectileExpired { .. } => "projectile_expired",
            SessionEvent::EnemyStruck { .. } => "enemy_struck",
            SessionEvent::EnemyKilled { .. } => "enemy_killed",
            SessionEvent::ScoreChanged { .. } => "score_changed",
            SessionEvent::PlayerHealthChanged { .. } => "player_health_changed",
            SessionEvent::GameOver { .. } => "game_over",
            SessionEvent::Restarted => "restarted",
            SessionEvent::Stepped { .. } => "stepped",
        }
    }
}
