//! Entity registry: world objects and their placements in parallel slices.

use flock_collision::WorldObject;
use flock_core::{EntityId, FlockError, FlockResult};
use flock_spatial::Transform;
use glam::Vec3;
use rustc_hash::FxHashMap;

/// Every placed entity, stored in the parallel-slice layout the collision
/// pass consumes directly.
///
/// Slot `i` of [`objects`][Self::objects] and
/// [`transforms`][Self::transforms] describe the same entity.  Despawning
/// clears the transform but keeps the slot, so slot indices stay stable for
/// the lifetime of the world and per-frame position snapshots never shift.
pub struct World {
    /// Fixed description per slot: kind flags, local box, owning agent.
    pub objects: Vec<WorldObject>,

    /// Live placement per slot.  `None` once the entity is despawned.
    pub transforms: Vec<Option<Transform>>,

    /// Entity id → slot for live entities only.
    index: FxHashMap<EntityId, usize>,

    /// Next id to hand out.  Ids are never reused within one world.
    next_entity: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            transforms: Vec::new(),
            index: FxHashMap::default(),
            next_entity: 0,
        }
    }

    /// Place a new entity.  The closure receives the freshly allocated id and
    /// returns the object description to store under it.
    pub fn spawn(
        &mut self,
        transform: Transform,
        build: impl FnOnce(EntityId) -> WorldObject,
    ) -> EntityId {
        let entity = EntityId(self.next_entity);
        self.next_entity += 1;

        let slot = self.objects.len();
        self.objects.push(build(entity));
        self.transforms.push(Some(transform));
        self.index.insert(entity, slot);
        entity
    }

    /// Remove an entity from play.  Its slot stays allocated but empty.
    pub fn despawn(&mut self, entity: EntityId) -> FlockResult<()> {
        match self.index.remove(&entity) {
            Some(slot) => {
                self.transforms[slot] = None;
                Ok(())
            }
            None => Err(FlockError::EntityNotFound(entity)),
        }
    }

    /// Slot of a live entity.
    pub fn slot(&self, entity: EntityId) -> Option<usize> {
        self.index.get(&entity).copied()
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.slot(entity).and_then(|i| self.transforms[i])
    }

    pub fn transform_mut(&mut self, entity: EntityId) -> Option<&mut Transform> {
        let slot = self.slot(entity)?;
        self.transforms[slot].as_mut()
    }

    pub fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.transform(entity).map(|t| t.pos)
    }

    /// Total slots ever allocated, despawned ones included.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of live entities.
    pub fn live_count(&self) -> usize {
        self.index.len()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
