use crate::errors::{AppError, StoreError};
use crate::mock::{SamplePoint, SampleStats, weekly_calorie_series};
use crate::models::{
    FilterQuery, GoalDraft, GoalForm, ProgressForm, ProgressRequest, StatsResponse, Workout,
    WorkoutForm, WorkoutPatchRequest, WorkoutRequest, parse_number,
};
use crate::notifications::Notification;
use crate::state::AppState;
use crate::stats::{GoalSummary, build_progress, completed_goal_count, goal_summary};
use crate::ui::{Dashboard, render_index};
use axum::{
    Form, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::Utc;
use serde::Serialize;

pub async fn index(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> Html<String> {
    let notifications = state.notifications.drain().await;
    let tracker = state.tracker.lock().await;
    let now = Utc::now();
    let goals = tracker.goals.list();
    let view = Dashboard {
        date: now.format("%A, %B %-d, %Y").to_string(),
        filter: query.category(),
        workouts: tracker.workouts.list(query.category()),
        goals: goals.iter().map(|goal| goal_summary(goal, now)).collect(),
        goals_completed: completed_goal_count(goals),
        sample: SampleStats::generate(&mut rand::thread_rng()),
        notifications,
    };
    Html(render_index(&view))
}

// Form posts: every outcome becomes a notification and a redirect back home.

pub async fn add_workout_form(State(state): State<AppState>, Form(form): Form<WorkoutForm>) -> Redirect {
    let result = match form.into_draft() {
        Ok(draft) => state.tracker.lock().await.workouts.add(draft).await.map(Some),
        Err(err) => Err(err),
    };
    notify(&state, result, "Workout added successfully!", "Workout not found").await
}

pub async fn edit_workout_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(form): Form<WorkoutForm>,
) -> Redirect {
    let result = match form.into_patch() {
        Ok(patch) => state.tracker.lock().await.workouts.edit(id, patch).await,
        Err(err) => Err(err),
    };
    notify(&state, result, "Workout updated successfully!", "Workout not found").await
}

pub async fn delete_workout_form(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    let result = state.tracker.lock().await.workouts.remove(id).await;
    notify(&state, result.map(|removed| removed.then_some(())), "Workout deleted!", "Workout not found").await
}

pub async fn start_workout_form(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    if start(&state, id).await.is_none() {
        state.notifications.push(Notification::error("Workout not found")).await;
    }
    Redirect::to("/")
}

pub async fn add_goal_form(State(state): State<AppState>, Form(form): Form<GoalForm>) -> Redirect {
    let result = match form.into_draft() {
        Ok(draft) => state.tracker.lock().await.goals.add(draft).await.map(Some),
        Err(err) => Err(err),
    };
    notify(&state, result, "Goal added successfully!", "Goal not found").await
}

pub async fn update_progress_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(form): Form<ProgressForm>,
) -> Redirect {
    let result = match parse_number("progress", &form.progress) {
        Ok(value) => state.tracker.lock().await.goals.set_progress(id, value).await,
        Err(err) => Err(err),
    };
    notify(&state, result, "Progress updated!", "Goal not found").await
}

pub async fn delete_goal_form(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    let result = state.tracker.lock().await.goals.remove(id).await;
    notify(&state, result.map(|removed| removed.then_some(())), "Goal deleted!", "Goal not found").await
}

async fn notify<T>(
    state: &AppState,
    result: Result<Option<T>, StoreError>,
    done: &str,
    missing: &str,
) -> Redirect {
    let notification = match result {
        Ok(Some(_)) => Notification::success(done),
        Ok(None) => Notification::error(missing),
        Err(err) => Notification::error(err.to_string()),
    };
    state.notifications.push(notification).await;
    Redirect::to("/")
}

async fn start(state: &AppState, id: u64) -> Option<Notification> {
    let name = {
        let tracker = state.tracker.lock().await;
        tracker.workouts.get(id)?.name.clone()
    };
    Some(
        state
            .notifications
            .simulate_workout(&name, state.workout_delay)
            .await,
    )
}

// JSON API.

pub async fn list_workouts(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<Vec<Workout>> {
    let tracker = state.tracker.lock().await;
    Json(tracker.workouts.list(query.category()).into_iter().cloned().collect())
}

pub async fn create_workout(
    State(state): State<AppState>,
    payload: Result<Json<WorkoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Workout>), AppError> {
    let Json(request) = payload?;
    let draft = request.into_draft()?;
    let workout = state.tracker.lock().await.workouts.add(draft).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn update_workout(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<WorkoutPatchRequest>, JsonRejection>,
) -> Result<Json<Workout>, AppError> {
    let Json(request) = payload?;
    let patch = request.into_patch()?;
    let mut tracker = state.tracker.lock().await;
    tracker
        .workouts
        .edit(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("workout {id} not found")))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    if state.tracker.lock().await.workouts.remove(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("workout {id} not found")))
    }
}

pub async fn start_workout(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Notification>, AppError> {
    start(&state, id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("workout {id} not found")))
}

pub async fn list_goals(State(state): State<AppState>) -> Json<Vec<GoalSummary>> {
    let tracker = state.tracker.lock().await;
    let now = Utc::now();
    Json(tracker.goals.list().iter().map(|goal| goal_summary(goal, now)).collect())
}

pub async fn create_goal(
    State(state): State<AppState>,
    payload: Result<Json<GoalDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<GoalSummary>), AppError> {
    let Json(draft) = payload?;
    let goal = state.tracker.lock().await.goals.add(draft).await?;
    Ok((StatusCode::CREATED, Json(goal_summary(&goal, Utc::now()))))
}

pub async fn set_goal_progress(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<Json<GoalSummary>, AppError> {
    let Json(request) = payload?;
    let value = request.progress.parse("progress")?;
    let goal = state.tracker.lock().await.goals.set_progress(id, value).await?;
    goal.map(|goal| Json(goal_summary(&goal, Utc::now())))
        .ok_or_else(|| AppError::not_found(format!("goal {id} not found")))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    if state.tracker.lock().await.goals.remove(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("goal {id} not found")))
    }
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let tracker = state.tracker.lock().await;
    Json(build_progress(tracker.workouts.len(), tracker.goals.list()))
}

#[derive(Debug, Serialize)]
pub struct SampleStatsResponse {
    #[serde(flatten)]
    pub stats: SampleStats,
    pub weekly_calorie_series: Vec<SamplePoint>,
}

pub async fn get_sample_stats() -> Json<SampleStatsResponse> {
    Json(SampleStatsResponse {
        stats: SampleStats::generate(&mut rand::thread_rng()),
        weekly_calorie_series: weekly_calorie_series(),
    })
}

pub async fn get_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.notifications.drain().await)
}
