//! Named entity collections
//!
//! Entities join collections when they are spawned and leave every one of
//! them when they are destroyed. Membership is many-to-many.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Stable entity handle, allocated monotonically
pub type EntityId = u32;

/// The collections an entity can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Receives `update(dt)` every tick
    Updatable,
    /// Receives `draw(surface)` every tick
    Drawable,
    /// Targets for collision passes
    Asteroids,
    Shots,
}

impl Group {
    pub const ALL: [Group; 4] = [
        Group::Updatable,
        Group::Drawable,
        Group::Asteroids,
        Group::Shots,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Group::Updatable => "updatable",
            Group::Drawable => "drawable",
            Group::Asteroids => "asteroids",
            Group::Shots => "shots",
        }
    }
}

/// Id sets per group, iterated in id order
#[derive(Debug, Clone, Default)]
pub struct Groups {
    sets: BTreeMap<Group, BTreeSet<EntityId>>,
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: Group, id: EntityId) {
        self.sets.entry(group).or_default().insert(id);
    }

    /// Returns true if the id was a member
    pub fn remove(&mut self, group: Group, id: EntityId) -> bool {
        self.sets
            .get_mut(&group)
            .is_some_and(|set| set.remove(&id))
    }

    pub fn contains(&self, group: Group, id: EntityId) -> bool {
        self.sets.get(&group).is_some_and(|set| set.contains(&id))
    }

    pub fn len(&self, group: Group) -> usize {
        self.sets.get(&group).map_or(0, BTreeSet::len)
    }

    pub fn is_empty(&self, group: Group) -> bool {
        self.len(group) == 0
    }

    /// Live view of a group, in id order
    pub fn iter(&self, group: Group) -> impl Iterator<Item = EntityId> + '_ {
        self.sets.get(&group).into_iter().flatten().copied()
    }

    /// Frozen copy of a group's members, safe to hold while the world mutates
    pub fn snapshot(&self, group: Group) -> Vec<EntityId> {
        self.iter(group).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let mut groups = Groups::new();
        groups.insert(Group::Updatable, 1);
        groups.insert(Group::Drawable, 1);
        groups.insert(Group::Updatable, 2);

        assert!(groups.contains(Group::Updatable, 1));
        assert!(groups.contains(Group::Drawable, 1));
        assert!(!groups.contains(Group::Drawable, 2));
        assert_eq!(groups.len(Group::Updatable), 2);
        assert!(groups.is_empty(Group::Shots));

        assert!(groups.remove(Group::Updatable, 1));
        assert!(!groups.remove(Group::Updatable, 1));
        assert!(!groups.remove(Group::Shots, 1));
        assert_eq!(groups.snapshot(Group::Updatable), vec![2]);
    }

    #[test]
    fn test_iteration_is_id_ordered() {
        let mut groups = Groups::new();
        for id in [5, 1, 3] {
            groups.insert(Group::Asteroids, id);
        }
        assert_eq!(groups.snapshot(Group::Asteroids), vec![1, 3, 5]);
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let mut groups = Groups::new();
        groups.insert(Group::Shots, 1);
        let frozen = groups.snapshot(Group::Shots);
        groups.insert(Group::Shots, 2);
        groups.remove(Group::Shots, 1);
        assert_eq!(frozen, vec![1]);
    }
}
