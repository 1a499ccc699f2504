use crate::errors::StoreError;
use crate::ids::IdGenerator;
use crate::models::{Goal, GoalDraft};
use crate::storage::{GOALS_KEY, KeyValueStore, load_collection, persist_collection};
use chrono::{NaiveDate, SecondsFormat, Utc};
use std::sync::Arc;
use tracing::info;

/// Owns the goal collection and mirrors it to storage on every change.
#[derive(Debug)]
pub struct GoalStore {
    store: Arc<KeyValueStore>,
    goals: Vec<Goal>,
    ids: IdGenerator,
}

impl GoalStore {
    pub async fn load(store: Arc<KeyValueStore>) -> Self {
        let goals: Vec<Goal> = load_collection(&store, GOALS_KEY).await;
        let ids = IdGenerator::seeded(goals.iter().map(|g| g.id));
        Self { store, goals, ids }
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn list(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: u64) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub async fn add(&mut self, draft: GoalDraft) -> Result<Goal, StoreError> {
        if !draft.target.is_finite() {
            return Err(StoreError::validation("target", "must be a finite number"));
        }
        NaiveDate::parse_from_str(draft.deadline.trim(), "%Y-%m-%d").map_err(|err| {
            StoreError::validation("deadline", format!("'{}' is not a YYYY-MM-DD date: {err}", draft.deadline))
        })?;

        let goal = Goal {
            id: self.ids.next(),
            title: draft.title,
            kind: draft.kind,
            target: draft.target,
            deadline: draft.deadline.trim().to_string(),
            progress: 0.0,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.goals.push(goal.clone());
        if let Err(err) = self.persist().await {
            self.goals.pop();
            return Err(err);
        }

        info!(id = goal.id, kind = %goal.kind, "goal added");
        Ok(goal)
    }

    /// Replaces the seeded collection wholesale, keeping the given ids.
    pub async fn replace_all(&mut self, goals: Vec<Goal>) -> Result<(), StoreError> {
        let previous = std::mem::replace(&mut self.goals, goals);
        if let Err(err) = self.persist().await {
            self.goals = previous;
            return Err(err);
        }
        self.ids = IdGenerator::seeded(self.goals.iter().map(|g| g.id));
        Ok(())
    }

    /// Overwrites progress with `value`. Bounds are not enforced; only
    /// non-finite values are rejected.
    pub async fn set_progress(&mut self, id: u64, value: f64) -> Result<Option<Goal>, StoreError> {
        if !value.is_finite() {
            return Err(StoreError::validation("progress", "must be a finite number"));
        }
        let Some(index) = self.goals.iter().position(|goal| goal.id == id) else {
            return Ok(None);
        };

        let previous = std::mem::replace(&mut self.goals[index].progress, value);
        if let Err(err) = self.persist().await {
            self.goals[index].progress = previous;
            return Err(err);
        }

        info!(id, progress = value, "goal progress updated");
        Ok(Some(self.goals[index].clone()))
    }

    pub async fn remove(&mut self, id: u64) -> Result<bool, StoreError> {
        let Some(index) = self.goals.iter().position(|goal| goal.id == id) else {
            return Ok(false);
        };

        let removed = self.goals.remove(index);
        if let Err(err) = self.persist().await {
            self.goals.insert(index, removed);
            return Err(err);
        }

        info!(id, "goal removed");
        Ok(true)
    }

    async fn persist(&self) -> Result<(), StoreError> {
        persist_collection(&self.store, GOALS_KEY, &self.goals).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, target: f64) -> GoalDraft {
        GoalDraft {
            title: title.into(),
            kind: "weight".into(),
            target,
            deadline: "2030-01-01".into(),
        }
    }

    async fn empty_store() -> (Arc<KeyValueStore>, GoalStore) {
        let backing = Arc::new(KeyValueStore::memory());
        let store = GoalStore::load(Arc::clone(&backing)).await;
        (backing, store)
    }

    #[tokio::test]
    async fn add_starts_at_zero_progress() {
        let (backing, mut store) = empty_store().await;
        let goal = store.add(draft("Lose 5kg", 5.0)).await.unwrap();
        assert_eq!(goal.progress, 0.0);
        assert!(!goal.created_at.is_empty());

        let reloaded = GoalStore::load(backing).await;
        assert_eq!(reloaded.list(), [goal]);
    }

    #[tokio::test]
    async fn add_rejects_bad_target_and_deadline() {
        let (_, mut store) = empty_store().await;
        assert!(store.add(draft("x", f64::NAN)).await.is_err());
        let mut bad_date = draft("x", 5.0);
        bad_date.deadline = "next week".into();
        assert!(matches!(
            store.add(bad_date).await,
            Err(StoreError::Validation { field: "deadline", .. })
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn set_progress_overwrites_exactly() {
        let (_, mut store) = empty_store().await;
        let goal = store.add(draft("Lose 5kg", 5.0)).await.unwrap();

        for value in [2.0, 7.5, -1.25, 0.0] {
            let updated = store.set_progress(goal.id, value).await.unwrap().unwrap();
            assert_eq!(updated.progress, value);
        }
    }

    #[tokio::test]
    async fn set_progress_rejects_non_numeric() {
        let (_, mut store) = empty_store().await;
        let goal = store.add(draft("Lose 5kg", 5.0)).await.unwrap();
        store.set_progress(goal.id, 3.0).await.unwrap();

        let err = store.set_progress(goal.id, f64::NAN).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "progress", .. }));
        assert_eq!(store.get(goal.id).unwrap().progress, 3.0);
    }

    #[tokio::test]
    async fn set_progress_unknown_id_is_not_found() {
        let (_, mut store) = empty_store().await;
        assert_eq!(store.set_progress(42, 1.0).await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_filters_out_by_id() {
        let (_, mut store) = empty_store().await;
        let a = store.add(draft("a", 1.0)).await.unwrap();
        let b = store.add(draft("b", 1.0)).await.unwrap();

        assert!(store.remove(a.id).await.unwrap());
        assert!(!store.remove(a.id).await.unwrap());
        assert_eq!(store.list(), [b]);
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_progress() {
        let (backing, mut store) = empty_store().await;
        let goal = store.add(draft("a", 10.0)).await.unwrap();
        backing.set_fail_writes(true);

        assert!(matches!(
            store.set_progress(goal.id, 9.0).await,
            Err(StoreError::Persistence { .. })
        ));
        assert!(store.remove(goal.id).await.is_err());
        assert_eq!(store.list(), [goal]);
    }
}
