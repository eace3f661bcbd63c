use arcadia_common::{EntityId, Transform};
use arcadia_input::{ControlFlags, ControlScheme};
use arcadia_scene::SceneObject;
use arcadia_vehicle::{Cannon, Impact, Projectile, ProjectileFate, VehicleState};

use crate::clock::SimClock;
use crate::config::DriveConfig;
use crate::event::SessionEvent;
use crate::frame::Session;

/// Hover-tank session: one vehicle, its cannon, shells in flight and the
/// ground bursts they leave.
#[derive(Debug, Clone)]
pub struct DriveSession {
    config: DriveConfig,
    clock: SimClock,
    vehicle_id: EntityId,
    vehicle: VehicleState,
    cannon: Cannon,
    projectiles: Vec<Projectile>,
    impacts: Vec<Impact>,
    frame: u64,
    event_log: Vec<SessionEvent>,
}

impl DriveSession {
    pub fn new(config: DriveConfig, max_delta: f32) -> Self {
        let vehicle = VehicleState::at(config.start_position, 0.0);
        let vehicle_id = EntityId::new();
        let mut session = Self {
            config,
            clock: SimClock::new(max_delta),
            vehicle_id,
            vehicle,
            cannon: Cannon::new(),
            projectiles: Vec::new(),
            impacts: Vec::new(),
            frame: 0,
            event_log: Vec::new(),
        };
        session.event_log.push(SessionEvent::Spawned {
            id: vehicle_id,
            object: SceneObject::Vehicle,
            transform: vehicle.transform(),
        });
        session
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn vehicle_id(&self) -> EntityId {
        self.vehicle_id
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn impacts(&self) -> &[Impact] {
        &self.impacts
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.event_log
    }

    /// Advance one frame.
    ///
    /// Events accumulate until drained with [`Session::drain_events`];
    /// [`crate::FrameLoop`] does that every frame.
    pub fn step(&mut self, flags: &ControlFlags, delta: f32) {
        let delta = self.clock.advance(delta);
        let now = self.clock.now();

        self.vehicle
            .integrate(&self.config.vehicle, flags, delta, now);

        self.advance_projectiles(delta, now);
        self.expire_impacts(now);

        if let Some(shell) = self
            .cannon
            .pull(&self.config.cannon, &self.vehicle, flags.shoot, now)
        {
            self.event_log.push(SessionEvent::Spawned {
                id: shell.id,
                object: SceneObject::Projectile,
                transform: shell.transform(),
            });
            self.event_log.push(SessionEvent::ShotFired { id: shell.id });
            self.projectiles.push(shell);
        }

        self.frame += 1;
        self.event_log.push(SessionEvent::Stepped {
            frame: self.frame,
            time: now,
        });
    }

    fn advance_projectiles(&mut self, delta: f32, now: f64) {
        let params = self.config.cannon;
        let mut landed = Vec::new();
        let events = &mut self.event_log;
        self.projectiles
            .retain_mut(|shell| match shell.advance(&params, delta, now) {
                ProjectileFate::Flying => true,
                ProjectileFate::Landed(at) => {
                    tracing::debug!(id = %shell.id.short(), "shell landed");
                    events.push(SessionEvent::Despawned { id: shell.id });
                    events.push(SessionEvent::ProjectileLanded { id: shell.id, at });
                    landed.push(at);
                    false
                }
                ProjectileFate::Expired => {
                    tracing::debug!(id = %shell.id.short(), "shell expired");
                    events.push(SessionEvent::Despawned { id: shell.id });
                    events.push(SessionEvent::ProjectileExpired { id: shell.id });
                    false
                }
            });

        for at in landed {
            let burst = Impact::new(at, now);
            self.event_log.push(SessionEvent::Spawned {
                id: burst.id,
                object: SceneObject::Impact,
                transform: burst.transform(&params, now),
            });
            self.impacts.push(burst);
        }
    }

    fn expire_impacts(&mut self, now: f64) {
        let params = self.config.cannon;
        let events = &mut self.event_log;
        self.impacts.retain(|burst| {
            if burst.is_expired(&params, now) {
                events.push(SessionEvent::Despawned { id: burst.id });
                false
            } else {
                true
            }
        });
    }
}

impl Session for DriveSession {
    const SCHEME: ControlScheme = ControlScheme::Driving;

    fn step(&mut self, flags: &ControlFlags, delta: f32) {
        DriveSession::step(self, flags, delta);
    }

    fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.event_log)
    }

    fn visible(&self) -> Vec<(EntityId, SceneObject, Transform)> {
        let now = self.clock.now();
        let mut out = Vec::with_capacity(1 + self.projectiles.len() + self.impacts.len());
        out.push((self.vehicle_id, SceneObject::Vehicle, self.vehicle.transform()));
        out.extend(
            self.projectiles
                .iter()
                .map(|p| (p.id, SceneObject::Projectile, p.transform())),
        );
        out.extend(self.impacts.iter().map(|i| {
            (
                i.id,
                SceneObject::Impact,
                i.transform(&self.config.cannon, now),
            )
        }));
        out
    }

    fn now(&self) -> f64 {
        self.clock.now()
    }
}
