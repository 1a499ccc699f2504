use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, patch, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/workouts", post(handlers::add_workout_form))
        .route("/workouts/:id/edit", post(handlers::edit_workout_form))
        .route("/workouts/:id/delete", post(handlers::delete_workout_form))
        .route("/workouts/:id/start", post(handlers::start_workout_form))
        .route("/goals", post(handlers::add_goal_form))
        .route("/goals/:id/progress", post(handlers::update_progress_form))
        .route("/goals/:id/delete", post(handlers::delete_goal_form))
        .route(
            "/api/workouts",
            get(handlers::list_workouts).post(handlers::create_workout),
        )
        .route(
            "/api/workouts/:id",
            patch(handlers::update_workout).delete(handlers::delete_workout),
        )
        .route("/api/workouts/:id/start", post(handlers::start_workout))
        .route(
            "/api/goals",
            get(handlers::list_goals).post(handlers::create_goal),
        )
        .route("/api/goals/:id", axum::routing::delete(handlers::delete_goal))
        .route("/api/goals/:id/progress", put(handlers::set_goal_progress))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/sample-stats", get(handlers::get_sample_stats))
        .route("/api/notifications", get(handlers::get_notifications))
        .with_state(state)
}
