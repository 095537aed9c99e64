//! In-memory aircraft store.
//!
//! Satisfies the same read contract as the SQLite repository without a
//! database. Records are stored as given; range checks stay with the
//! calculator so bad data can be modelled.

use crate::model::aircraft::{Aircraft, AircraftId};
use crate::model::performance::AircraftPerformanceSnapshot;
use crate::repo::aircraft_repo::{AircraftDataStore, RepoError, RepoResult};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAircraftStore {
    snapshots: HashMap<AircraftId, AircraftPerformanceSnapshot>,
}

impl InMemoryAircraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the snapshot keyed by its aircraft id.
    pub fn insert(&mut self, snapshot: AircraftPerformanceSnapshot) {
        self.snapshots.insert(snapshot.aircraft_id, snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl FromIterator<Aircraft> for InMemoryAircraftStore {
    fn from_iter<T: IntoIterator<Item = Aircraft>>(iter: T) -> Self {
        let mut store = Self::new();
        for aircraft in iter {
            store.insert(AircraftPerformanceSnapshot::from(&aircraft));
        }
        store
    }
}

impl AircraftDataStore for InMemoryAircraftStore {
    fn resolve(&self, aircraft_id: AircraftId) -> RepoResult<AircraftPerformanceSnapshot> {
        self.snapshots
            .get(&aircraft_id)
            .cloned()
            .ok_or(RepoError::NotFound(aircraft_id))
    }
}
