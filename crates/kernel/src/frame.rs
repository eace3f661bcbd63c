use arcadia_common::{EntityId, Transform};
use arcadia_input::{ControlFlags, ControlScheme, Handled, InputEvent};
use arcadia_scene::{SceneGraph, SceneObject};

use crate::event::SessionEvent;

/// What the frame loop needs from a game session.
pub trait Session {
    /// Bindings the session's input is read with.
    const SCHEME: ControlScheme;

    /// Advance one frame with the given controls and raw frame time.
    fn step(&mut self, flags: &ControlFlags, delta: f32);

    /// Take every event recorded since the last drain.
    fn drain_events(&mut self) -> Vec<SessionEvent>;

    /// Every live visual object with its current transform.
    fn visible(&self) -> Vec<(EntityId, SceneObject, Transform)>;

    /// Session clock in seconds.
    fn now(&self) -> f64;
}

/// Result of one call to [`FrameLoop::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No scene attached yet (or already torn down); nothing advanced.
    Skipped,
    /// The session advanced; these are the events it produced.
    Stepped { events: Vec<SessionEvent> },
}

/// Explicit per-frame driver: owns a session, the held controls and, once
/// attached, the scene handle the session is mirrored into.
///
/// The host calls [`FrameLoop::step`] once per display frame instead of the
/// session rescheduling itself.
#[derive(Debug)]
pub struct FrameLoop<S, G> {
    session: S,
    scene: Option<G>,
    flags: ControlFlags,
    frames: u64,
}

impl<S: Session, G: SceneGraph> FrameLoop<S, G> {
    /// Wrap a session. No scene is attached, so steps are skipped until
    /// [`FrameLoop::attach`] is called.
    pub fn new(session: S) -> Self {
        Self {
            session,
            scene: None,
            flags: ControlFlags::default(),
            frames: 0,
        }
    }

    /// Init: hand over the scene and populate it with every live object.
    pub fn attach(&mut self, mut scene: G) {
        for (id, object, transform) in self.session.visible() {
            if scene.contains(id) {
                continue;
            }
            if let Err(e) = scene.add(id, object, transform) {
                tracing::warn!("scene attach: {e}");
            }
        }
        tracing::info!(objects = scene.len(), "scene attached");
        self.scene = Some(scene);
    }

    /// Teardown: remove the session's objects and give the scene back.
    pub fn detach(&mut self) -> Option<G> {
        let mut scene = self.scene.take()?;
        for (id, _, _) in self.session.visible() {
            if scene.contains(id) {
                if let Err(e) = scene.remove(id) {
                    tracing::warn!("scene detach: {e}");
                }
            }
        }
        self.flags.clear();
        tracing::info!(frames = self.frames, "scene detached");
        Some(scene)
    }

    pub fn is_attached(&self) -> bool {
        self.scene.is_some()
    }

    /// Fold a raw input event into the held controls.
    pub fn handle_input(&mut self, event: InputEvent) -> Handled {
        self.flags.handle(S::SCHEME, event)
    }

    pub fn flags(&self) -> &ControlFlags {
        &self.flags
    }

    pub fn set_flags(&mut self, flags: ControlFlags) {
        self.flags = flags;
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Direct access for out-of-band operations such as a restart.
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn scene(&self) -> Option<&G> {
        self.scene.as_ref()
    }

    /// Frames actually stepped (skipped frames are not counted).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame: advance the session, then mirror it into the scene.
    pub fn step(&mut self, delta: f32) -> FrameOutcome {
        let Some(scene) = self.scene.as_mut() else {
            tracing::trace!("no scene attached; frame skipped");
            return FrameOutcome::Skipped;
        };
        let _span = tracing::info_span!("frame", n = self.frames).entered();

        self.session.step(&self.flags, delta);
        let events = self.session.drain_events();

        for event in &events {
            let result = match event {
                SessionEvent::Spawned {
                    id,
                    object,
                    transform,
                } if !scene.contains(*id) => scene.add(*id, *object, *transform),
                SessionEvent::Despawned { id } if scene.contains(*id) => scene.remove(*id),
                _ => Ok(()),
            };
            if let Err(e) = result {
                tracing::warn!("scene sync: {e}");
            }
        }
        for (id, _, transform) in self.session.visible() {
            if let Err(e) = scene.set_transform(id, transform) {
                tracing::warn!("scene sync: {e}");
            }
        }

        self.frames += 1;
        FrameOutcome::Stepped { events }
    }
}
