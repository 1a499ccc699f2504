use crate::mock::SampleStats;
use crate::models::Workout;
use crate::notifications::{Notification, NotificationKind};
use crate::stats::GoalSummary;

pub const WORKOUT_CATEGORIES: [&str; 3] = ["strength", "cardio", "flexibility"];
pub const GOAL_TYPES: [&str; 4] = ["weight", "strength", "endurance", "flexibility"];

pub struct Dashboard<'a> {
    pub date: String,
    pub filter: Option<&'a str>,
    pub workouts: Vec<&'a Workout>,
    pub goals: Vec<GoalSummary>,
    pub goals_completed: usize,
    pub sample: SampleStats,
    pub notifications: Vec<Notification>,
}

pub fn render_index(view: &Dashboard<'_>) -> String {
    fill(
        INDEX_HTML,
        &[
            ("DATE", escape(&view.date)),
            ("NOTIFICATIONS", render_notifications(&view.notifications)),
            ("CALORIES", view.sample.daily_calories.to_string()),
            ("MINUTES", format!("{} min", view.sample.workout_minutes)),
            ("GOALS_COMPLETED", view.goals_completed.to_string()),
            ("FILTERS", render_filters(view.filter)),
            ("WORKOUT_TYPES", render_options(&WORKOUT_CATEGORIES, None)),
            ("WORKOUTS", render_workout_cards(&view.workouts)),
            ("GOAL_TYPES", render_options(&GOAL_TYPES, None)),
            ("GOALS", render_goal_items(&view.goals)),
            ("WEIGHT", format!("{:.1} kg", view.sample.current_weight_kg)),
            ("BODY_FAT", format!("{:.1}%", view.sample.body_fat_percent)),
            ("WEEKLY_WORKOUTS", view.sample.weekly_workouts.to_string()),
            ("WEEKLY_CALORIES", view.sample.weekly_calories.to_string()),
        ],
    )
}

/// Substitutes `{{NAME}}` markers in one pass over `template`.
/// Inserted values are never scanned again, so user text containing a marker stays literal.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

pub fn render_filters(active: Option<&str>) -> String {
    std::iter::once("all")
        .chain(WORKOUT_CATEGORIES)
        .map(|kind| {
            let selected = active.unwrap_or("all") == kind;
            format!(
                r#"<a class="filter-btn{}" href="/?filter={kind}">{kind}</a>"#,
                if selected { " active" } else { "" }
            )
        })
        .collect()
}

/// Full replacement markup for the workout grid.
pub fn render_workout_cards(workouts: &[&Workout]) -> String {
    if workouts.is_empty() {
        return r#"<p class="empty">No workouts yet.</p>"#.to_string();
    }
    workouts.iter().map(|workout| render_workout_card(workout)).collect()
}

fn render_workout_card(workout: &Workout) -> String {
    let id = workout.id;
    let kind = escape(&workout.kind);
    let name = escape(&workout.name);
    let description = escape(&workout.description);
    format!(
        r#"<div class="workout-card" data-id="{id}">
  <span class="workout-type {kind}">{kind}</span>
  <h3 class="workout-title">{name}</h3>
  <p class="workout-duration">{duration} minutes &middot; {calories} kcal</p>
  <p class="workout-description">{description}</p>
  <div class="workout-actions">
    <form method="post" action="/workouts/{id}/start"><button class="start-btn">Start</button></form>
    <form method="post" action="/workouts/{id}/delete" onsubmit="return confirm('Delete this workout?')"><button class="delete-btn">Delete</button></form>
  </div>
  <details>
    <summary>Edit</summary>
    <form method="post" action="/workouts/{id}/edit" class="stack">
      <input name="name" value="{name}" required>
      <select name="type">{options}</select>
      <input name="duration" type="number" min="0" value="{duration}" required>
      <textarea name="description">{description}</textarea>
      <button>Save</button>
    </form>
  </details>
</div>
"#,
        duration = workout.duration,
        calories = workout.calories,
        options = render_options(&WORKOUT_CATEGORIES, Some(workout.kind.as_str())),
    )
}

/// Full replacement markup for the goal list.
pub fn render_goal_items(goals: &[GoalSummary]) -> String {
    if goals.is_empty() {
        return r#"<p class="empty">No goals yet.</p>"#.to_string();
    }
    goals.iter().map(render_goal_item).collect()
}

fn render_goal_item(summary: &GoalSummary) -> String {
    let goal = &summary.goal;
    let id = goal.id;
    let title = escape(&goal.title);
    let unit = summary.unit;
    let days_left = match summary.days_left {
        Some(days) if days > 0 => days.to_string(),
        Some(_) => "Overdue".to_string(),
        None => "Unknown".to_string(),
    };
    let (bar_width, label) = match (summary.display_percentage, summary.percentage) {
        (Some(width), Some(pct)) => (width, format!("{}% Complete", pct.round())),
        _ => (0.0, "Progress undefined".to_string()),
    };
    format!(
        r#"<div class="goal-item" data-id="{id}">
  <div class="goal-header"><h4 class="goal-title">{title}</h4><span class="goal-type {kind}">{kind}</span></div>
  <div class="goal-details">
    <p>Target: {target} {unit}</p>
    <p>Progress: {progress} {unit}</p>
    <p>Deadline: {deadline}</p>
    <p>Days left: {days_left}</p>
  </div>
  <div class="progress-bar"><div class="progress-fill" style="width: {bar_width}%"></div></div>
  <p class="progress-label">{label}</p>
  <div class="goal-actions">
    <form method="post" action="/goals/{id}/progress">
      <input name="progress" inputmode="decimal" value="{progress}" aria-label="Current progress">
      <button>Update Progress</button>
    </form>
    <form method="post" action="/goals/{id}/delete" onsubmit="return confirm('Are you sure you want to delete this goal?')"><button class="delete-btn">Delete</button></form>
  </div>
</div>
"#,
        kind = escape(&goal.kind),
        target = goal.target,
        progress = goal.progress,
        deadline = escape(&goal.deadline),
    )
}

fn render_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|notification| {
            let class = match notification.kind {
                NotificationKind::Success => "success",
                NotificationKind::Info => "info",
                NotificationKind::Error => "error",
            };
            format!(
                r#"<div class="notification {class}">{}</div>"#,
                escape(&notification.message)
            )
        })
        .collect()
}

/// A `selected` value outside `values` is kept as an extra first option.
fn render_options(values: &[&str], selected: Option<&str>) -> String {
    let extra = selected.filter(|current| !values.contains(current));
    extra
        .into_iter()
        .chain(values.iter().copied())
        .map(|value| {
            let marker = if selected == Some(value) { " selected" } else { "" };
            let value = escape(value);
            format!(r#"<option value="{value}"{marker}>{value}</option>"#)
        })
        .collect()
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fitness Tracker</title>
  <style>
    :root {
      --bg: #f5f7fb;
      --ink: #1f2937;
      --accent: #6366f1;
      --ok: #10b981;
      --bad: #ef4444;
      --card: #ffffff;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 24px;
    }

    main { max-width: 1040px; margin: 0 auto; display: grid; gap: 28px; }
    section { background: var(--card); border-radius: 16px; padding: 24px; box-shadow: 0 8px 24px rgba(31, 41, 55, 0.08); }
    h1, h2 { margin: 0 0 12px; }
    .summary, .sample { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; }
    .metric { background: var(--bg); border-radius: 12px; padding: 14px; }
    .metric .label { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.08em; color: #6b7280; }
    .metric .value { font-size: 1.5rem; font-weight: 600; }
    .tag { font-size: 0.75rem; color: #9ca3af; }
    .filters { display: flex; gap: 8px; margin-bottom: 16px; }
    .filter-btn { padding: 6px 14px; border-radius: 999px; background: var(--bg); color: var(--ink); text-decoration: none; text-transform: capitalize; }
    .filter-btn.active { background: var(--accent); color: white; }
    .workout-grid, .goals-list { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 16px; }
    .workout-card, .goal-item { border: 1px solid #e5e7eb; border-radius: 12px; padding: 16px; }
    .workout-type, .goal-type { font-size: 0.75rem; text-transform: uppercase; color: var(--accent); }
    .workout-actions, .goal-actions { display: flex; gap: 8px; flex-wrap: wrap; }
    .stack { display: grid; gap: 8px; margin-top: 8px; }
    .progress-bar { height: 8px; background: #e5e7eb; border-radius: 4px; overflow: hidden; }
    .progress-fill { height: 100%; background: var(--accent); }
    .progress-label { text-align: center; font-size: 0.9rem; }
    button { padding: 6px 12px; border: none; border-radius: 6px; background: var(--accent); color: white; cursor: pointer; }
    .delete-btn { background: var(--bad); }
    .notification { padding: 12px 16px; border-radius: 8px; color: white; background: var(--accent); }
    .notification.success { background: var(--ok); }
    .notification.error { background: var(--bad); }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Fitness Tracker</h1>
      <p id="current-date">{{DATE}}</p>
      <div id="notifications">{{NOTIFICATIONS}}</div>
    </header>

    <section id="summary" class="summary">
      <div class="metric"><span class="label">Calories burned</span><span id="calories-burned" class="value">{{CALORIES}}</span><span class="tag">sample</span></div>
      <div class="metric"><span class="label">Workout time</span><span id="workout-time" class="value">{{MINUTES}}</span><span class="tag">sample</span></div>
      <div class="metric"><span class="label">Goals completed</span><span id="goals-completed" class="value">{{GOALS_COMPLETED}}</span></div>
    </section>

    <section id="workouts">
      <h2>Workouts</h2>
      <div class="filters">{{FILTERS}}</div>
      <div id="workout-grid" class="workout-grid">{{WORKOUTS}}</div>
      <details>
        <summary>Add workout</summary>
        <form id="workout-form" method="post" action="/workouts" class="stack">
          <input name="name" placeholder="Workout name" required>
          <select name="type">{{WORKOUT_TYPES}}</select>
          <input name="duration" type="number" min="0" placeholder="Duration (minutes)" required>
          <textarea name="description" placeholder="Description"></textarea>
          <button>Add Workout</button>
        </form>
      </details>
    </section>

    <section id="goals">
      <h2>Goals</h2>
      <div id="goals-list" class="goals-list">{{GOALS}}</div>
      <form id="goal-form" method="post" action="/goals" class="stack">
        <input name="title" placeholder="Goal title" required>
        <select name="type">{{GOAL_TYPES}}</select>
        <input name="target" inputmode="decimal" placeholder="Target" required>
        <input name="deadline" type="date" required>
        <button>Add Goal</button>
      </form>
    </section>

    <section id="progress">
      <h2>Progress <span class="tag">sample data</span></h2>
      <div class="sample">
        <div class="metric"><span class="label">Current weight</span><span id="current-weight" class="value">{{WEIGHT}}</span></div>
        <div class="metric"><span class="label">Body fat</span><span id="body-fat" class="value">{{BODY_FAT}}</span></div>
        <div class="metric"><span class="label">Weekly workouts</span><span id="weekly-workouts" class="value">{{WEEKLY_WORKOUTS}}</span></div>
        <div class="metric"><span class="label">Weekly calories</span><span id="weekly-calories" class="value">{{WEEKLY_CALORIES}}</span></div>
      </div>
    </section>
  </main>
</body>
</html>
"#;
