pub mod app;
pub mod config;
pub mod errors;
pub mod goals;
pub mod handlers;
pub mod ids;
pub mod mock;
pub mod models;
pub mod notifications;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod workouts;

pub use app::router;
pub use config::Config;
pub use state::{AppState, Tracker};
pub use storage::KeyValueStore;
