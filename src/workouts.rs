use crate::errors::StoreError;
use crate::ids::IdGenerator;
use crate::models::{Workout, WorkoutDraft, WorkoutPatch};
use crate::storage::{KeyValueStore, WORKOUTS_KEY, load_collection, persist_collection};
use rand::Rng;
use std::{ops::Range, sync::Arc};
use tracing::info;

/// Placeholder calorie estimate assigned to new workouts.
pub const CALORIE_RANGE: Range<u32> = 200..400;

/// Owns the workout collection and mirrors it to storage on every change.
///
/// A mutation that cannot be persisted is undone before the error is returned.
#[derive(Debug)]
pub struct WorkoutStore {
    store: Arc<KeyValueStore>,
    workouts: Vec<Workout>,
    ids: IdGenerator,
}

impl WorkoutStore {
    pub async fn load(store: Arc<KeyValueStore>) -> Self {
        let workouts: Vec<Workout> = load_collection(&store, WORKOUTS_KEY).await;
        let ids = IdGenerator::seeded(workouts.iter().map(|w| w.id));
        Self {
            store,
            workouts,
            ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// Insertion order; `Some(kind)` keeps only workouts of that type.
    pub fn list(&self, filter: Option<&str>) -> Vec<&Workout> {
        self.workouts
            .iter()
            .filter(|workout| filter.is_none_or(|kind| workout.kind == kind))
            .collect()
    }

    pub fn get(&self, id: u64) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id == id)
    }

    pub async fn add(&mut self, draft: WorkoutDraft) -> Result<Workout, StoreError> {
        validate_duration(draft.duration)?;
        let workout = Workout {
            id: self.ids.next(),
            name: draft.name,
            kind: draft.kind,
            duration: draft.duration,
            description: draft.description,
            calories: rand::thread_rng().gen_range(CALORIE_RANGE),
        };

        self.workouts.push(workout.clone());
        if let Err(err) = self.persist().await {
            self.workouts.pop();
            return Err(err);
        }

        info!(id = workout.id, kind = %workout.kind, "workout added");
        Ok(workout)
    }

    /// Replaces the seeded collection wholesale, keeping the given ids.
    pub async fn replace_all(&mut self, workouts: Vec<Workout>) -> Result<(), StoreError> {
        let previous = std::mem::replace(&mut self.workouts, workouts);
        if let Err(err) = self.persist().await {
            self.workouts = previous;
            return Err(err);
        }
        self.ids = IdGenerator::seeded(self.workouts.iter().map(|w| w.id));
        Ok(())
    }

    pub async fn edit(&mut self, id: u64, patch: WorkoutPatch) -> Result<Option<Workout>, StoreError> {
        if let Some(duration) = patch.duration {
            validate_duration(duration)?;
        }
        let Some(index) = self.workouts.iter().position(|workout| workout.id == id) else {
            return Ok(None);
        };

        let previous = self.workouts[index].clone();
        let workout = &mut self.workouts[index];
        if let Some(name) = patch.name {
            workout.name = name;
        }
        if let Some(kind) = patch.kind {
            workout.kind = kind;
        }
        if let Some(duration) = patch.duration {
            workout.duration = duration;
        }
        if let Some(description) = patch.description {
            workout.description = description;
        }
        let updated = workout.clone();

        if let Err(err) = self.persist().await {
            self.workouts[index] = previous;
            return Err(err);
        }

        info!(id, "workout updated");
        Ok(Some(updated))
    }

    pub async fn remove(&mut self, id: u64) -> Result<bool, StoreError> {
        let Some(index) = self.workouts.iter().position(|workout| workout.id == id) else {
            return Ok(false);
        };

        let removed = self.workouts.remove(index);
        if let Err(err) = self.persist().await {
            self.workouts.insert(index, removed);
            return Err(err);
        }

        info!(id, "workout removed");
        Ok(true)
    }

    async fn persist(&self) -> Result<(), StoreError> {
        persist_collection(&self.store, WORKOUTS_KEY, &self.workouts).await
    }
}

fn validate_duration(duration: i64) -> Result<(), StoreError> {
    if duration < 0 {
        return Err(StoreError::validation("duration", "must not be negative"));
    }
    Ok(())
}
