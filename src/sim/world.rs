//! Entity storage and collection membership
//!
//! The world owns every entity by id. Spawning registers the new id into the
//! collections named by the caller; destroying removes it from all of them.
//! Destroy is idempotent: a second call for the same id is a no-op.

use std::collections::BTreeMap;

use rand::Rng;
use rand_pcg::Pcg32;

use super::asteroid::Asteroid;
use super::body::{Entity, Update};
use super::field::AsteroidField;
use super::groups::{EntityId, Group, Groups};
use super::player::Player;
use super::shot::Shot;
use super::state::{Spawn, UpdateCtx};
use super::tick::TickInput;
use crate::error::SimError;
use crate::renderer::Surface;
use crate::settings::Settings;

/// Any object the world can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Player(Player),
    Asteroid(Asteroid),
    Shot(Shot),
    Field(AsteroidField),
}

impl Slot {
    /// Physical view; `None` for the field, which has no geometry
    pub fn as_entity(&self) -> Option<&dyn Entity> {
        match self {
            Slot::Player(p) => Some(p),
            Slot::Asteroid(a) => Some(a),
            Slot::Shot(s) => Some(s),
            Slot::Field(_) => None,
        }
    }

    pub fn as_update_mut(&mut self) -> &mut dyn Update {
        match self {
            Slot::Player(p) => p,
            Slot::Asteroid(a) => a,
            Slot::Shot(s) => s,
            Slot::Field(f) => f,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Slot::Player(_) => "Player",
            Slot::Asteroid(_) => "Asteroid",
            Slot::Shot(_) => "Shot",
            Slot::Field(_) => "AsteroidField",
        }
    }

    /// Facing, for entities that have one
    pub fn rotation(&self) -> Option<f32> {
        match self {
            Slot::Player(p) => Some(p.rotation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Stored {
    slot: Slot,
    /// Every collection this id was registered into
    groups: Vec<Group>,
}

/// Result of splitting one asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    /// Radius of the destroyed parent
    pub radius: f32,
    /// Angle rolled for the fragments, if any were made
    pub angle: Option<f32>,
    /// Ids of the new fragments (empty at minimum size)
    pub children: Vec<EntityId>,
}

#[derive(Debug, Clone)]
pub struct World {
    entities: BTreeMap<EntityId, Stored>,
    groups: Groups,
    next_id: EntityId,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            groups: Groups::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Store `slot` and register it into `groups`
    pub fn insert(&mut self, slot: Slot, groups: &[Group]) -> EntityId {
        let id = self.next_entity_id();
        for &group in groups {
            self.groups.insert(group, id);
        }
        self.entities.insert(
            id,
            Stored {
                slot,
                groups: groups.to_vec(),
            },
        );
        id
    }

    pub fn spawn_player(&mut self, player: Player) -> EntityId {
        self.insert(Slot::Player(player), Player::GROUPS)
    }

    pub fn spawn_asteroid(&mut self, asteroid: Asteroid) -> EntityId {
        self.insert(Slot::Asteroid(asteroid), Asteroid::GROUPS)
    }

    pub fn spawn_shot(&mut self, shot: Shot) -> EntityId {
        self.insert(Slot::Shot(shot), Shot::GROUPS)
    }

    pub fn spawn_field(&mut self, field: AsteroidField) -> EntityId {
        self.insert(Slot::Field(field), AsteroidField::GROUPS)
    }

    /// Apply a deferred spawn request
    pub fn apply(&mut self, spawn: Spawn) -> EntityId {
        match spawn {
            Spawn::Asteroid(asteroid) => self.spawn_asteroid(asteroid),
            Spawn::Shot(shot) => self.spawn_shot(shot),
        }
    }

    /// Remove an entity from storage and from every collection it joined.
    /// Returns false if it was already gone.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let Some(stored) = self.entities.remove(&id) else {
            return false;
        };
        for group in stored.groups {
            self.groups.remove(group, id);
        }
        true
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn get(&self, id: EntityId) -> Option<&Slot> {
        self.entities.get(&id).map(|stored| &stored.slot)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Slot> {
        self.entities.get_mut(&id).map(|stored| &mut stored.slot)
    }

    pub fn entity(&self, id: EntityId) -> Option<&dyn Entity> {
        self.get(id).and_then(Slot::as_entity)
    }

    pub fn player(&self, id: EntityId) -> Option<&Player> {
        match self.get(id) {
            Some(Slot::Player(p)) => Some(p),
            _ => None,
        }
    }

    pub fn player_mut(&mut self, id: EntityId) -> Option<&mut Player> {
        match self.get_mut(id) {
            Some(Slot::Player(p)) => Some(p),
            _ => None,
        }
    }

    pub fn asteroid(&self, id: EntityId) -> Option<&Asteroid> {
        match self.get(id) {
            Some(Slot::Asteroid(a)) => Some(a),
            _ => None,
        }
    }

    pub fn shot(&self, id: EntityId) -> Option<&Shot> {
        match self.get(id) {
            Some(Slot::Shot(s)) => Some(s),
            _ => None,
        }
    }

    pub fn field(&self, id: EntityId) -> Option<&AsteroidField> {
        match self.get(id) {
            Some(Slot::Field(f)) => Some(f),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, id: EntityId) -> Option<&mut AsteroidField> {
        match self.get_mut(id) {
            Some(Slot::Field(f)) => Some(f),
            _ => None,
        }
    }

    /// Update every member of "updatable" once, then register whatever the
    /// updates asked to spawn. Returns the number of new entities.
    ///
    /// Entities spawned here are not updated until the next call.
    pub fn update_all(
        &mut self,
        dt: f32,
        input: &TickInput,
        settings: &Settings,
        rng: &mut Pcg32,
    ) -> Result<usize, SimError> {
        let mut spawns = Vec::new();
        let mut ctx = UpdateCtx {
            input,
            settings,
            rng,
            spawns: &mut spawns,
        };

        for id in self.groups.snapshot(Group::Updatable) {
            if let Some(stored) = self.entities.get_mut(&id) {
                stored.slot.as_update_mut().update(dt, &mut ctx)?;
            }
        }

        let spawned = spawns.len();
        for spawn in spawns {
            self.apply(spawn);
        }
        Ok(spawned)
    }

    /// Draw every member of "drawable"; returns how many were drawn
    pub fn draw_all(&self, surface: &mut dyn Surface, line_width: f32) -> usize {
        let mut drawn = 0;
        for id in self.groups.iter(Group::Drawable) {
            if let Some(entity) = self.entity(id) {
                entity.draw(surface, line_width);
                drawn += 1;
            }
        }
        drawn
    }

    /// Destroy an asteroid and register its fragments.
    ///
    /// The parent is always destroyed. Returns `None` if `id` is not a live
    /// asteroid.
    pub fn split_asteroid<R: Rng>(
        &mut self,
        id: EntityId,
        min_radius: f32,
        rng: &mut R,
    ) -> Result<Option<SplitOutcome>, SimError> {
        let Some(parent) = self.asteroid(id).cloned() else {
            return Ok(None);
        };
        self.destroy(id);

        let radius = parent.body.radius;
        if !parent.can_split(min_radius) {
            log::debug!("Asteroid {id} (radius {radius}) destroyed without fragments");
            return Ok(Some(SplitOutcome {
                radius,
                angle: None,
                children: Vec::new(),
            }));
        }

        let angle = Asteroid::roll_split_angle(rng);
        let children = match parent.fragments(min_radius, angle)? {
            Some(fragments) => fragments
                .into_iter()
                .map(|fragment| self.spawn_asteroid(fragment))
                .collect(),
            None => Vec::new(),
        };
        log::debug!(
            "Asteroid {id} (radius {radius}) split at {angle:.1} deg into {:?}",
            children
        );

        Ok(Some(SplitOutcome {
            radius,
            angle: Some(angle),
            children,
        }))
    }
}
