use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Messages waiting to be shown on the next page render or API poll.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationQueue {
    pub async fn push(&self, notification: Notification) {
        self.pending.lock().await.push(notification);
    }

    pub async fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock().await)
    }

    /// Announces the start now and the completion after `delay`.
    /// Stored workouts and goals are left untouched.
    pub async fn simulate_workout(&self, name: &str, delay: Duration) -> Notification {
        let started = Notification::info(format!("Starting {name}..."));
        self.push(started.clone()).await;

        let queue = self.clone();
        let name = name.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!(workout = %name, "simulated workout finished");
            queue
                .push(Notification::success(format!("{name} completed! Great job!")))
                .await;
        });

        started
    }
}
