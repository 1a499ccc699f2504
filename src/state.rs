use crate::config::Config;
use crate::errors::StoreError;
use crate::goals::GoalStore;
use crate::mock::{sample_goals, sample_workouts};
use crate::notifications::NotificationQueue;
use crate::storage::KeyValueStore;
use crate::workouts::WorkoutStore;
use chrono::Utc;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::info;

/// Both stores behind one lock, so each request runs to completion alone.
#[derive(Debug)]
pub struct Tracker {
    pub workouts: WorkoutStore,
    pub goals: GoalStore,
}

impl Tracker {
    pub async fn load(store: Arc<KeyValueStore>) -> Self {
        Self {
            workouts: WorkoutStore::load(Arc::clone(&store)).await,
            goals: GoalStore::load(store).await,
        }
    }

    /// Fills empty collections with the sample records.
    pub async fn seed_samples(&mut self) -> Result<(), StoreError> {
        if self.workouts.is_empty() {
            self.workouts.replace_all(sample_workouts()).await?;
            info!("seeded sample workouts");
        }
        if self.goals.is_empty() {
            self.goals
                .replace_all(sample_goals(Utc::now().date_naive()))
                .await?;
            info!("seeded sample goals");
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<Tracker>>,
    pub notifications: NotificationQueue,
    pub workout_delay: Duration,
}

impl AppState {
    pub fn new(tracker: Tracker, workout_delay: Duration) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
            notifications: NotificationQueue::default(),
            workout_delay,
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store = Arc::new(KeyValueStore::file(&config.data_dir));
        let mut tracker = Tracker::load(store).await;
        if config.seed_samples {
            tracker.seed_samples().await?;
        }
        Ok(Self::new(tracker, config.workout_delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeding_only_fills_empty_collections() {
        let store = Arc::new(KeyValueStore::memory());
        let mut tracker = Tracker::load(Arc::clone(&store)).await;
        tracker.seed_samples().await.unwrap();
        assert_eq!(tracker.workouts.len(), 4);
        assert_eq!(tracker.goals.list().len(), 2);

        tracker.goals.remove(1).await.unwrap();
        tracker.seed_samples().await.unwrap();
        assert_eq!(tracker.goals.list().len(), 1);

        let reloaded = Tracker::load(store).await;
        assert_eq!(reloaded.workouts.len(), 4);
        assert_eq!(reloaded.goals.list().len(), 1);
    }
}
