use crate::models::{Goal, StatsResponse};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

const DAY_MILLIS: f64 = 86_400_000.0;

/// Goal with every value the dashboard derives from it.
#[derive(Debug, Clone, Serialize)]
pub struct GoalSummary {
    #[serde(flatten)]
    pub goal: Goal,
    pub unit: &'static str,
    /// `None` when the percentage is undefined (zero target).
    pub percentage: Option<f64>,
    pub display_percentage: Option<f64>,
    pub days_left: Option<i64>,
    pub completed: bool,
}

pub fn completed_goal_count(goals: &[Goal]) -> usize {
    goals.iter().filter(|goal| is_completed(goal)).count()
}

pub fn is_completed(goal: &Goal) -> bool {
    goal.progress >= goal.target
}

pub fn percentage(goal: &Goal) -> Option<f64> {
    let value = goal.progress / goal.target * 100.0;
    value.is_finite().then_some(value)
}

pub fn display_percentage(goal: &Goal) -> Option<f64> {
    percentage(goal).map(|value| value.clamp(0.0, 100.0))
}

/// Whole days until midnight UTC of the deadline, rounded up. Negative once overdue.
pub fn days_left_at(goal: &Goal, now: DateTime<Utc>) -> Option<i64> {
    let deadline = NaiveDate::parse_from_str(goal.deadline.trim(), "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?
        .and_utc();
    let millis = (deadline - now).num_milliseconds() as f64;
    Some((millis / DAY_MILLIS).ceil() as i64)
}

pub fn goal_summary(goal: &Goal, now: DateTime<Utc>) -> GoalSummary {
    GoalSummary {
        unit: goal.unit(),
        percentage: percentage(goal),
        display_percentage: display_percentage(goal),
        days_left: days_left_at(goal, now),
        completed: is_completed(goal),
        goal: goal.clone(),
    }
}

pub fn build_progress(workouts_total: usize, goals: &[Goal]) -> StatsResponse {
    StatsResponse {
        workouts_total,
        goals_total: goals.len(),
        goals_completed: completed_goal_count(goals),
    }
}
