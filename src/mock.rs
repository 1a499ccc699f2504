//! Placeholder figures and seed records.
//!
//! Nothing here is computed from stored workouts or goals. Responses built from
//! these values carry `"sample": true` so they are never mistaken for analytics.

use crate::models::{Goal, Workout};
use chrono::{Duration, NaiveDate, SecondsFormat, Utc};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SampleStats {
    pub sample: bool,
    pub current_weight_kg: f64,
    pub body_fat_percent: f64,
    pub weekly_workouts: u32,
    pub weekly_calories: u32,
    pub daily_calories: u32,
    pub workout_minutes: u32,
}

impl SampleStats {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let weekly_workouts: u32 = rng.gen_range(2..7);
        let weekly_calories = f64::from(weekly_workouts * 300) + rng.gen_range(0.0..200.0);
        Self {
            sample: true,
            current_weight_kg: round_tenth(75.0 + rng.gen_range(0.0..5.0)),
            body_fat_percent: round_tenth(15.0 + rng.gen_range(0.0..5.0)),
            weekly_workouts,
            weekly_calories: weekly_calories.round() as u32,
            daily_calories: (weekly_calories / 7.0).round() as u32,
            workout_minutes: weekly_workouts * 45,
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Serialize)]
pub struct SamplePoint {
    pub day: &'static str,
    pub calories: u32,
}

pub fn weekly_calorie_series() -> Vec<SamplePoint> {
    ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        .into_iter()
        .zip([320, 450, 280, 380, 420, 350, 400])
        .map(|(day, calories)| SamplePoint { day, calories })
        .collect()
}

pub fn sample_workouts() -> Vec<Workout> {
    let seed = [
        (
            "Full Body Strength",
            "strength",
            45,
            "Complete full body workout targeting all major muscle groups with compound movements.",
            350,
        ),
        (
            "HIIT Cardio",
            "cardio",
            30,
            "High-intensity interval training to boost cardiovascular fitness and burn calories.",
            400,
        ),
        (
            "Yoga Flow",
            "flexibility",
            60,
            "Gentle yoga session focusing on flexibility, balance, and mindfulness.",
            200,
        ),
        (
            "Upper Body Focus",
            "strength",
            40,
            "Targeted upper body workout for chest, back, shoulders, and arms.",
            300,
        ),
    ];
    seed.into_iter()
        .zip(1..)
        .map(|((name, kind, duration, description, calories), id)| Workout {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            duration,
            description: description.to_string(),
            calories,
        })
        .collect()
}

pub fn sample_goals(today: NaiveDate) -> Vec<Goal> {
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    [
        (1, "Lose 5kg", "weight", 5.0, 30, 2.0),
        (2, "Run 10km", "endurance", 60.0, 14, 30.0),
    ]
    .into_iter()
    .map(|(id, title, kind, target, days, progress)| Goal {
        id,
        title: title.to_string(),
        kind: kind.to_string(),
        target,
        deadline: (today + Duration::days(days)).format("%Y-%m-%d").to_string(),
        progress,
        created_at: created_at.clone(),
    })
    .collect()
}
