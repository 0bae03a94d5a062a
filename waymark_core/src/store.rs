//! Workout store with file-backed persistence.
//!
//! The store is an ordered, append-only sequence of workouts. Persistence is
//! a full overwrite of one JSON blob: saves go through a locked temp file and
//! an atomic rename, loads are lenient (a missing or corrupt blob yields an
//! empty store, never an error).

use crate::{Error, Result, Workout, WorkoutRecord};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Ordered in-memory collection of workouts, insertion order = creation order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a workout, O(1). No side effects beyond in-memory state.
    pub fn add(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// Linear scan by id. List sizes are bounded by manual entry.
    pub fn find_by_id(&self, id: &Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| &w.id() == id)
    }

    /// All workouts in insertion order
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Load the store from a file with shared locking
    ///
    /// Returns an empty store if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No workout file found, starting empty");
            return Ok(Self::new());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open workout file {:?}: {}. Starting empty.",
                    path,
                    e
                );
                return Ok(Self::new());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock workout file {:?}: {}. Starting empty.",
                path,
                e
            );
            return Ok(Self::new());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read workout file {:?}: {}. Starting empty.",
                path,
                e
            );
            return Ok(Self::new());
        }

        file.unlock()?;

        match serde_json::from_str::<Vec<WorkoutRecord>>(&contents) {
            Ok(records) => {
                let workouts = records.into_iter().map(Workout::from_record).collect();
                tracing::debug!("Loaded workout store from {:?}", path);
                Ok(Self { workouts })
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse workout file {:?}: {}. Starting empty.",
                    path,
                    e
                );
                Ok(Self::new())
            }
        }
    }

    /// Save the whole store to a file with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "workout path missing parent")
        })?)?;

        // Exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let records: Vec<WorkoutRecord> = self.workouts.iter().map(Workout::to_record).collect();
            let contents = serde_json::to_string(&records)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} workouts to {:?}", self.workouts.len(), path);
        Ok(())
    }

    /// Empty the store and erase the persisted blob (the full-reset operation)
    pub fn clear(&mut self, path: &Path) -> Result<()> {
        self.workouts.clear();

        match std::fs::remove_file(path) {
            Ok(()) => tracing::info!("Removed workout file {:?}", path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinates;

    fn sample_running() -> Workout {
        Workout::running(Coordinates::new(40.0, -73.0), 5.0, 25.0, 170.0)
    }

    fn sample_cycling() -> Workout {
        Workout::cycling(Coordinates::new(48.2, 16.4), 30.0, 90.0, 250.0)
    }

    #[test]
    fn test_add_and_find_by_id() {
        let mut store = WorkoutStore::new();
        let workout = sample_running();
        let id = workout.id();

        store.add(workout);

        assert!(store.find_by_id(&id).is_some());
        assert!(store.find_by_id(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let mut store = WorkoutStore::new();
        let first = sample_running();
        let second = sample_cycling();
        let (first_id, second_id) = (first.id(), second.id());

        store.add(first);
        store.add(second);

        let ids: Vec<Uuid> = store.all().iter().map(Workout::id).collect();
        assert_eq!(ids, vec![first_id, second_id]);
    }

    #[test]
    fn test_all_is_idempotent() {
        let mut store = WorkoutStore::new();
        store.add(sample_running());
        store.add(sample_cycling());

        let first_view: Vec<Workout> = store.all().to_vec();
        let second_view: Vec<Workout> = store.all().to_vec();
        assert_eq!(first_view, second_view);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workouts.json");

        let mut store = WorkoutStore::new();
        store.add(sample_running());
        store.add(sample_cycling());

        store.save(&path).unwrap();
        let loaded = WorkoutStore::load(&path).unwrap();

        // attribute-for-attribute, derived fields included
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let store = WorkoutStore::load(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupted_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("corrupted.json");
        std::fs::write(&path, "[ not json }").unwrap();

        let store = WorkoutStore::load(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_removes_persisted_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workouts.json");

        let mut store = WorkoutStore::new();
        store.add(sample_running());
        store.save(&path).unwrap();
        assert!(path.exists());

        store.clear(&path).unwrap();

        assert!(store.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_clear_tolerates_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("never_saved.json");

        let mut store = WorkoutStore::new();
        store.add(sample_running());

        store.clear(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workouts.json");

        let mut store = WorkoutStore::new();
        store.add(sample_running());
        store.save(&path).unwrap();

        assert!(path.exists());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "workouts.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only workouts.json, found extras: {:?}",
            extras
        );
    }
}
