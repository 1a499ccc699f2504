use crate::errors::StoreError;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::fs;
use tracing::error;

pub const WORKOUTS_KEY: &str = "workouts";
pub const GOALS_KEY: &str = "goals";

/// String-keyed storage holding one JSON document per key.
///
/// Writes always replace the whole value; there is no merge and no versioning.
#[derive(Debug)]
pub enum KeyValueStore {
    File {
        dir: PathBuf,
    },
    Memory {
        entries: Mutex<HashMap<String, String>>,
        fail_writes: AtomicBool,
    },
}

impl KeyValueStore {
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self::File { dir: dir.into() }
    }

    pub fn memory() -> Self {
        Self::Memory {
            entries: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent `set` on a memory store fail. No-op for files.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Self::Memory { fail_writes, .. } = self {
            fail_writes.store(fail, Ordering::SeqCst);
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, std::io::Error> {
        match self {
            Self::File { dir } => match fs::read_to_string(entry_path(dir, key)).await {
                Ok(text) => Ok(Some(text)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err),
            },
            Self::Memory { entries, .. } => Ok(lock(entries).get(key).cloned()),
        }
    }

    pub async fn set(&self, key: &str, value: String) -> Result<(), std::io::Error> {
        match self {
            Self::File { dir } => {
                fs::create_dir_all(dir).await?;
                fs::write(entry_path(dir, key), value).await
            }
            Self::Memory {
                entries,
                fail_writes,
            } => {
                if fail_writes.load(Ordering::SeqCst) {
                    return Err(std::io::Error::other("storage is not writable"));
                }
                lock(entries).insert(key.to_string(), value);
                Ok(())
            }
        }
    }
}

fn entry_path(dir: &std::path::Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

fn lock(entries: &Mutex<HashMap<String, String>>) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Reads a collection; a missing or corrupt entry yields an empty one.
pub async fn load_collection<T: DeserializeOwned>(store: &KeyValueStore, key: &str) -> Vec<T> {
    match store.get(key).await {
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(items) => items,
            Err(err) => {
                error!("failed to parse stored '{key}': {err}");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            error!("failed to read stored '{key}': {err}");
            Vec::new()
        }
    }
}

pub async fn persist_collection<T: Serialize>(
    store: &KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let payload = serde_json::to_string(items).map_err(|err| StoreError::persistence(key, err))?;
    store.set(key, payload).await.map_err(|err| {
        error!("failed to persist '{key}': {err}");
        StoreError::persistence(key, err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goal;

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("fitness_storage_{name}_{}_{nanos}", std::process::id()))
    }

    fn goal(id: u64, target: f64, progress: f64) -> Goal {
        Goal {
            id,
            title: format!("goal {id}"),
            kind: "strength".into(),
            target,
            deadline: "2030-06-01".into(),
            progress,
            created_at: "2026-10-18T09:00:00Z".into(),
        }
    }

    #[tokio::test]
    async fn missing_key_loads_empty() {
        let store = KeyValueStore::memory();
        let goals: Vec<Goal> = load_collection(&store, GOALS_KEY).await;
        assert!(goals.is_empty());
    }

    #[tokio::test]
    async fn corrupt_entry_loads_empty() {
        let store = KeyValueStore::memory();
        store.set(GOALS_KEY, "{not json".into()).await.unwrap();
        let goals: Vec<Goal> = load_collection(&store, GOALS_KEY).await;
        assert!(goals.is_empty());
    }

    #[tokio::test]
    async fn file_store_reproduces_records_exactly() {
        let dir = temp_dir("roundtrip");
        let store = KeyValueStore::file(&dir);
        let goals = vec![goal(3, 0.1 + 0.2, 1.0 / 3.0), goal(1, 1e-9, -4.75), goal(2, 5.0, 2.0)];

        persist_collection(&store, GOALS_KEY, &goals).await.unwrap();
        let loaded: Vec<Goal> = load_collection(&store, GOALS_KEY).await;
        assert_eq!(loaded, goals);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn set_overwrites_whole_value() {
        let store = KeyValueStore::memory();
        persist_collection(&store, GOALS_KEY, &[goal(1, 5.0, 0.0), goal(2, 5.0, 0.0)])
            .await
            .unwrap();
        persist_collection(&store, GOALS_KEY, &[goal(9, 1.0, 1.0)]).await.unwrap();
        let loaded: Vec<Goal> = load_collection(&store, GOALS_KEY).await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 9);
    }

    #[tokio::test]
    async fn failing_writes_report_persistence_error() {
        let store = KeyValueStore::memory();
        store.set_fail_writes(true);
        let err = persist_collection(&store, GOALS_KEY, &[goal(1, 5.0, 0.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
        assert_eq!(store.get(GOALS_KEY).await.unwrap(), None);
    }
}
