//! Population store — the current snapshot behind an atomic swap.
//!
//! Each snapshot is a self-contained hecs `World`: one entity per object with
//! its `ObjectId`, the `OrbitalObject` itself, and a marker component for the
//! object type. The marker acts as the secondary type index, so
//! `list_by_type` only visits the matching archetype.
//!
//! Writers build the next snapshot completely before taking the write lock;
//! the lock is held only to swap one `Arc` for another. Readers clone the
//! current `Arc` and work on an immutable snapshot, so they see either the
//! old population or the new one, never a mix.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use hecs::World;
use orbitwatch_logic::object::{ObjectType, OrbitalObject};
use serde::{Deserialize, Serialize};

/// Opaque row identifier assigned at insertion. Never reused by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A stored object with its row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: ObjectId,
    pub object: OrbitalObject,
}

impl AsRef<OrbitalObject> for Record {
    fn as_ref(&self) -> &OrbitalObject {
        &self.object
    }
}

// Type index markers
struct SatelliteTag;
struct OtherTag;

/// One immutable, versioned population.
pub struct Snapshot {
    world: World,
    version: u64,
    len: usize,
}

impl Snapshot {
    fn from_records(records: Vec<Record>) -> Self {
        let len = records.len();
        let mut world = World::new();
        for Record { id, object } in records {
            match object.object_type {
                ObjectType::Satellite => world.spawn((id, object, SatelliteTag)),
                ObjectType::Other => world.spawn((id, object, OtherTag)),
            };
        }
        Self {
            world,
            version: 0,
            len,
        }
    }

    fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    /// Install counter; 0 for the initial empty store.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All records in insertion order.
    pub fn records(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .world
            .query::<(&ObjectId, &OrbitalObject)>()
            .iter()
            .map(|(_, (id, object))| Record {
                id: *id,
                object: object.clone(),
            })
            .collect();
        records.sort_by_key(|r| r.id);
        records
    }

    /// Records of one type in insertion order, read through the type index.
    pub fn records_of_type(&self, object_type: ObjectType) -> Vec<Record> {
        match object_type {
            ObjectType::Satellite => self.tagged::<SatelliteTag>(),
            ObjectType::Other => self.tagged::<OtherTag>(),
        }
    }

    fn tagged<Tag: hecs::Component>(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .world
            .query::<(&ObjectId, &OrbitalObject, &Tag)>()
            .iter()
            .map(|(_, (id, object, _))| Record {
                id: *id,
                object: object.clone(),
            })
            .collect();
        records.sort_by_key(|r| r.id);
        records
    }

    /// Number of objects of one type, without cloning them.
    pub fn count_of_type(&self, object_type: ObjectType) -> usize {
        match object_type {
            ObjectType::Satellite => self.world.query::<&SatelliteTag>().iter().count(),
            ObjectType::Other => self.world.query::<&OtherTag>().iter().count(),
        }
    }
}

/// Errors surfaced by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A writer panicked while holding the swap lock.
    Poisoned,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Poisoned => write!(f, "population store lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Holds the current population snapshot.
pub struct Store {
    current: RwLock<Arc<Snapshot>>,
    next_id: AtomicU64,
}

impl Store {
    /// Create an empty store (version 0).
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::empty())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Discard the whole population and install `objects` in its place.
    /// Returns the version of the installed snapshot.
    pub fn replace_all(&self, objects: Vec<OrbitalObject>) -> Result<u64, StoreError> {
        let first = self
            .next_id
            .fetch_add(objects.len() as u64, Ordering::Relaxed);
        let records = objects
            .into_iter()
            .enumerate()
            .map(|(i, object)| Record {
                id: ObjectId(first + i as u64),
                object,
            })
            .collect();
        self.install(Snapshot::from_records(records))
    }

    /// Install previously saved records, keeping their ids.
    pub fn restore(&self, records: Vec<Record>) -> Result<u64, StoreError> {
        if let Some(max) = records.iter().map(|r| r.id.0).max() {
            self.next_id.fetch_max(max + 1, Ordering::Relaxed);
        }
        self.install(Snapshot::from_records(records))
    }

    fn install(&self, mut snapshot: Snapshot) -> Result<u64, StoreError> {
        let mut current = self.current.write().map_err(|_| StoreError::Poisoned)?;
        snapshot.version = current.version + 1;
        let version = snapshot.version;
        let previous = std::mem::replace(&mut *current, Arc::new(snapshot));
        drop(current);
        // The old world is freed outside the lock (or later, by the last reader).
        drop(previous);
        Ok(version)
    }

    /// The current snapshot. Stays valid and unchanged for as long as it is held.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>, StoreError> {
        let current = self.current.read().map_err(|_| StoreError::Poisoned)?;
        Ok(Arc::clone(&current))
    }

    pub fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.snapshot()?.records())
    }

    pub fn list_by_type(&self, object_type: ObjectType) -> Result<Vec<Record>, StoreError> {
        Ok(self.snapshot()?.records_of_type(object_type))
    }

    pub fn version(&self) -> Result<u64, StoreError> {
        Ok(self.snapshot()?.version())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.snapshot()?.len())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitwatch_logic::population::{build_population, PopulationConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population(seed: u64) -> Vec<OrbitalObject> {
        build_population(&PopulationConfig::default(), &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn starts_empty() {
        let store = Store::new();
        assert_eq!(store.version().unwrap(), 0);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn replace_all_installs_in_insertion_order() {
        let store = Store::new();
        let objects = population(1);
        let version = store.replace_all(objects.clone()).unwrap();
        assert_eq!(version, 1);

        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 740);
        let stored: Vec<OrbitalObject> = records.into_iter().map(|r| r.object).collect();
        assert_eq!(stored, objects);
    }

    #[test]
    fn replace_all_discards_previous_population() {
        let store = Store::new();
        store.replace_all(population(1)).unwrap();
        let second = population(2);
        store.replace_all(second.clone()).unwrap();

        let names: Vec<String> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| r.object.name)
            .collect();
        let expected: Vec<String> = second.into_iter().map(|o| o.name).collect();
        assert_eq!(names, expected);
        assert_eq!(store.version().unwrap(), 2);
    }

    #[test]
    fn replace_with_empty_then_list_is_empty() {
        let store = Store::new();
        store.replace_all(population(3)).unwrap();
        store.replace_all(Vec::new()).unwrap();
        assert!(store.list_all().unwrap().is_empty());
        assert!(store.list_by_type(ObjectType::Satellite).unwrap().is_empty());
    }

    #[test]
    fn type_index_matches_equality_filter() {
        let store = Store::new();
        let objects = population(4);
        store.replace_all(objects.clone()).unwrap();

        for object_type in ObjectType::ALL {
            let indexed = store.list_by_type(object_type).unwrap();
            let expected: Vec<&OrbitalObject> = objects
                .iter()
                .filter(|o| o.object_type == object_type)
                .collect();
            assert_eq!(indexed.len(), expected.len());
            assert!(indexed.iter().zip(expected).all(|(r, o)| &r.object == o));
            assert!(indexed.windows(2).all(|w| w[0].id < w[1].id));

            let snapshot = store.snapshot().unwrap();
            assert_eq!(snapshot.count_of_type(object_type), indexed.len());
        }
    }

    #[test]
    fn ids_are_never_reused() {
        let store = Store::new();
        store.replace_all(population(5)).unwrap();
        let first_max = store.list_all().unwrap().last().unwrap().id;
        store.replace_all(population(6)).unwrap();
        let second_min = store.list_all().unwrap().first().unwrap().id;
        assert!(second_min > first_max);
    }

    #[test]
    fn held_snapshot_survives_replacement() {
        let store = Store::new();
        store.replace_all(population(7)).unwrap();
        let held = store.snapshot().unwrap();
        store.replace_all(Vec::new()).unwrap();

        assert_eq!(held.len(), 740);
        assert_eq!(held.records().len(), 740);
        assert_eq!(held.version(), 1);
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn restore_keeps_ids_and_advances_counter() {
        let store = Store::new();
        let records = vec![Record {
            id: ObjectId(900),
            object: population(8).remove(0),
        }];
        store.restore(records.clone()).unwrap();
        assert_eq!(store.list_all().unwrap(), records);

        store.replace_all(population(9)).unwrap();
        assert!(store.list_all().unwrap()[0].id > ObjectId(900));
    }
}
