use std::collections::BTreeMap;
use std::fmt::Write as _;

use arcadia_ai::EnemyKind;
use arcadia_common::{EntityId, Transform};

/// What a scene object looks like. The scene picks meshes from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneObject {
    Vehicle,
    Projectile,
    Impact,
    Player,
    Enemy(EnemyKind),
}

impl SceneObject {
    pub fn label(&self) -> &'static str {
        match self {
            SceneObject::Vehicle => "vehicle",
            SceneObject::Projectile => "projectile",
            SceneObject::Impact => "impact",
            SceneObject::Player => "player",
            SceneObject::Enemy(kind) => kind.name(),
        }
    }
}

/// Errors from scene mutations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("scene object {0:?} not found")]
    UnknownObject(EntityId),
    #[error("scene object {0:?} already present")]
    DuplicateObject(EntityId),
}

/// Scene-graph handle. All sessions write through this trait.
pub trait SceneGraph {
    fn add(&mut self, id: EntityId, object: SceneObject, transform: Transform)
    -> Result<(), SceneError>;

    fn remove(&mut self, id: EntityId) -> Result<(), SceneError>;

    fn set_transform(&mut self, id: EntityId, transform: Transform) -> Result<(), SceneError>;

    fn transform(&self, id: EntityId) -> Option<Transform>;

    fn contains(&self, id: EntityId) -> bool {
        self.transform(id).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Headless scene that records objects and dumps them as text.
#[derive(Debug, Default)]
pub struct TextScene {
    objects: BTreeMap<EntityId, (SceneObject, Transform)>,
}

impl TextScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, id: EntityId) -> Option<SceneObject> {
        self.objects.get(&id).map(|(object, _)| *object)
    }

    /// Number of objects of the given kind.
    pub fn count(&self, object: SceneObject) -> usize {
        self.objects.values().filter(|(o, _)| *o == object).count()
    }

    /// Human-readable dump, one line per object in id order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Scene ({} objects) ===", self.objects.len());
        for (id, (object, transform)) in &self.objects {
            let p = transform.position;
            let _ = writeln!(
                out,
                "  [{}] {:<10} pos=({:.2}, {:.2}, {:.2})",
                id.short(),
                object.label(),
                p.x,
                p.y,
                p.z
            );
        }
        out
    }
}

impl SceneGraph for TextScene {
    fn add(
        &mut self,
        id: EntityId,
        object: SceneObject,
        transform: Transform,
    ) -> Result<(), SceneError> {
        if self.objects.contains_key(&id) {
            return Err(SceneError::DuplicateObject(id));
        }
        tracing::trace!(id = %id.short(), object = object.label(), "scene add");
        self.objects.insert(id, (object, transform));
        Ok(())
    }

    fn remove(&mut self, id: EntityId) -> Result<(), SceneError> {
        self.objects
            .remove(&id)
            .map(|_| ())
            .ok_or(SceneError::UnknownObject(id))
    }

    fn set_transform(&mut self, id: EntityId, transform: Transform) -> Result<(), SceneError> {
        let (_, slot) = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::UnknownObject(id))?;
        *slot = transform;
        Ok(())
    }

    fn transform(&self, id: EntityId) -> Option<Transform> {
        self.objects.get(&id).map(|(_, t)| *t)
    }

    fn len(&self) -> usize {
        self.objects.len()
    }
}
