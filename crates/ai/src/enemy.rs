use arcadia_common::{EntityId, Transform, frame_scale, heading_towards, planar_distance};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Minimum simulated seconds between two strikes from the same enemy.
pub const ATTACK_COOLDOWN: f64 = 1.0;

/// How a kind reacts to a player inside its detection radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Temperament {
    /// Chases, then attacks inside the attack radius.
    Predator,
    /// Runs directly away. Never attacks.
    Prey,
}

/// Per-kind constants. Speeds are per 60 Hz frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub max_health: f32,
    pub speed: f32,
    pub detection_radius: f32,
    pub attack_radius: f32,
    pub attack_power: f32,
    pub temperament: Temperament,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    Wolf,
    Bear,
    Deer,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Wolf, EnemyKind::Bear, EnemyKind::Deer];

    pub fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Wolf => EnemyProfile {
                max_health: 50.0,
                speed: 0.08,
                detection_radius: 15.0,
                attack_radius: 2.0,
                attack_power: 10.0,
                temperament: Temperament::Predator,
            },
            EnemyKind::Bear => EnemyProfile {
                max_health: 100.0,
                speed: 0.05,
                detection_radius: 12.0,
                attack_radius: 2.5,
                attack_power: 20.0,
                temperament: Temperament::Predator,
            },
            EnemyKind::Deer => EnemyProfile {
                max_health: 30.0,
                speed: 0.1,
                detection_radius: 10.0,
                attack_radius: 0.0,
                attack_power: 0.0,
                temperament: Temperament::Prey,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Wolf => "wolf",
            EnemyKind::Bear => "bear",
            EnemyKind::Deer => "deer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AggroState {
    #[default]
    Idle,
    Chase,
    Attack,
    Flee,
}

/// Damage event emitted by an attacking enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    pub enemy: EntityId,
    pub power: f32,
    /// Clock time the strike was emitted.
    pub at: f64,
}

/// Outcome of one AI tick, computed without touching the enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub aggro: AggroState,
    pub movement: Vec3,
    pub heading: f32,
    pub strike: Option<Strike>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub health: f32,
    pub max_health: f32,
    pub position: Vec3,
    pub heading: f32,
    pub aggro: AggroState,
    pub last_attack_at: Option<f64>,
}

impl Enemy {
    pub fn spawn(kind: EnemyKind, position: Vec3) -> Self {
        Self::with_id(EntityId::new(), kind, position)
    }

    /// Spawn under an id chosen by the caller.
    pub fn with_id(id: EntityId, kind: EnemyKind, position: Vec3) -> Self {
        let profile = kind.profile();
        Self {
            id,
            kind,
            health: profile.max_health,
            max_health: profile.max_health,
            position,
            heading: 0.0,
            aggro: AggroState::Idle,
            last_attack_at: None,
        }
    }

    pub fn profile(&self) -> EnemyProfile {
        self.kind.profile()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn transform(&self) -> Transform {
        Transform::from_heading(self.position, self.heading)
    }

    fn cooled_down(&self, now: f64) -> bool {
        self.last_attack_at
            .is_none_or(|last| now - last > ATTACK_COOLDOWN)
    }

    /// Classify and steer for this frame. `delta` is the capped frame time.
    pub fn decide(&self, player: Vec3, now: f64, delta: f32) -> Decision {
        let idle = Decision {
            aggro: AggroState::Idle,
            movement: Vec3::ZERO,
            heading: self.heading,
            strike: None,
        };
        if self.is_dead() {
            return idle;
        }

        let profile = self.profile();
        let distance = planar_distance(self.position, player);
        if distance > profile.detection_radius {
            return idle;
        }

        let toward = Vec3::new(player.x - self.position.x, 0.0, player.z - self.position.z)
            .normalize_or_zero();
        let step = profile.speed * frame_scale(delta);
        let facing_player = if distance > 0.0 {
            heading_towards(self.position, player)
        } else {
            self.heading
        };

        match profile.temperament {
            Temperament::Prey => Decision {
                aggro: AggroState::Flee,
                movement: -toward * step,
                heading: if distance > 0.0 {
                    heading_towards(player, self.position)
                } else {
                    self.heading
                },
                strike: None,
            },
            Temperament::Predator if distance <= profile.attack_radius => Decision {
                aggro: AggroState::Attack,
                movement: Vec3::ZERO,
                heading: facing_player,
                strike: self.cooled_down(now).then_some(Strike {
                    enemy: self.id,
                    power: profile.attack_power,
                    at: now,
                }),
            },
            Temperament::Predator => Decision {
                aggro: AggroState::Chase,
                movement: toward * step,
                heading: facing_player,
                strike: None,
            },
        }
    }

    /// Commit a decision produced by [`Enemy::decide`].
    pub fn apply(&mut self, decision: &Decision) {
        if decision.aggro != self.aggro {
            tracing::debug!(
                id = %self.id.short(),
                kind = self.kind.name(),
                from = ?self.aggro,
                to = ?decision.aggro,
                "aggro transition"
            );
        }
        self.aggro = decision.aggro;
        self.position += decision.movement;
        self.heading = decision.heading;
        if let Some(strike) = decision.strike {
            self.last_attack_at = Some(strike.at);
        }
    }

    /// Decide and apply in one go; returns the strike, if any.
    pub fn think(&mut self, player: Vec3, now: f64, delta: f32) -> Option<Strike> {
        let decision = self.decide(player, now, delta);
        self.apply(&decision);
        decision.strike
    }

    /// Reduce health, clamping at zero. Returns true only on the hit that kills.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health = (self.health - amount.max(0.0)).max(0.0);
        self.is_dead()
    }
}
