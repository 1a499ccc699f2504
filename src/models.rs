use crate::errors::StoreError;
use serde::{Deserialize, Serialize};

/// A logged exercise session as stored under the `workouts` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: i64,
    pub description: String,
    pub calories: u32,
}

/// A tracked target as stored under the `goals` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target: f64,
    pub deadline: String,
    #[serde(default)]
    pub progress: f64,
    pub created_at: String,
}

impl Goal {
    pub fn unit(&self) -> &'static str {
        goal_unit(&self.kind)
    }
}

pub fn goal_unit(kind: &str) -> &'static str {
    match kind {
        "weight" => "kg",
        "strength" => "lbs",
        "endurance" => "minutes",
        "flexibility" => "inches",
        _ => "",
    }
}

#[derive(Debug, Clone)]
pub struct WorkoutDraft {
    pub name: String,
    pub kind: String,
    pub duration: i64,
    pub description: String,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct WorkoutPatch {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub duration: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target: f64,
    pub deadline: String,
}

// Form posts carry raw text; numbers are parsed before reaching a store.

#[derive(Debug, Deserialize)]
pub struct WorkoutForm {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

impl WorkoutForm {
    pub fn into_draft(self) -> Result<WorkoutDraft, StoreError> {
        Ok(WorkoutDraft {
            duration: parse_minutes(&self.duration)?,
            name: self.name,
            kind: self.kind,
            description: self.description,
        })
    }

    pub fn into_patch(self) -> Result<WorkoutPatch, StoreError> {
        Ok(WorkoutPatch {
            duration: Some(parse_minutes(&self.duration)?),
            name: Some(self.name),
            kind: Some(self.kind),
            description: Some(self.description),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct GoalForm {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target: String,
    pub deadline: String,
}

impl GoalForm {
    pub fn into_draft(self) -> Result<GoalDraft, StoreError> {
        Ok(GoalDraft {
            target: parse_number("target", &self.target)?,
            title: self.title,
            kind: self.kind,
            deadline: self.deadline,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgressForm {
    pub progress: String,
}

/// Accepts either a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    pub fn parse(&self, field: &'static str) -> Result<f64, StoreError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => parse_number(field, text),
        }
    }

    pub fn minutes(&self) -> Result<i64, StoreError> {
        match self {
            Self::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => Ok(*value as i64),
            Self::Number(value) => Err(StoreError::validation(
                "duration",
                format!("'{value}' is not a whole number of minutes"),
            )),
            Self::Text(text) => parse_minutes(text),
        }
    }
}

// JSON bodies take `duration` as a number or numeric string and validate it
// the same way form posts do.

#[derive(Debug, Deserialize)]
pub struct WorkoutRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: NumberInput,
    #[serde(default)]
    pub description: String,
}

impl WorkoutRequest {
    pub fn into_draft(self) -> Result<WorkoutDraft, StoreError> {
        Ok(WorkoutDraft {
            duration: self.duration.minutes()?,
            name: self.name,
            kind: self.kind,
            description: self.description,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkoutPatchRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub duration: Option<NumberInput>,
    pub description: Option<String>,
}

impl WorkoutPatchRequest {
    pub fn into_patch(self) -> Result<WorkoutPatch, StoreError> {
        Ok(WorkoutPatch {
            duration: self.duration.as_ref().map(NumberInput::minutes).transpose()?,
            name: self.name,
            kind: self.kind,
            description: self.description,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub progress: NumberInput,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(rename = "type", alias = "filter")]
    pub kind: Option<String>,
}

impl FilterQuery {
    /// `all` and the empty string mean no filter.
    pub fn category(&self) -> Option<&str> {
        self.kind
            .as_deref()
            .map(str::trim)
            .filter(|kind| !kind.is_empty() && *kind != "all")
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatsResponse {
    pub workouts_total: usize,
    pub goals_total: usize,
    pub goals_completed: usize,
}

pub fn parse_number(field: &'static str, text: &str) -> Result<f64, StoreError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| StoreError::validation(field, format!("'{text}' is not a number")))?;
    if !value.is_finite() {
        return Err(StoreError::validation(field, "must be a finite number"));
    }
    Ok(value)
}

pub fn parse_minutes(text: &str) -> Result<i64, StoreError> {
    text.trim().parse().map_err(|_| {
        StoreError::validation("duration", format!("'{text}' is not a whole number of minutes"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_json_uses_original_field_names() {
        let goal = Goal {
            id: 7,
            title: "Run 10km".into(),
            kind: "endurance".into(),
            target: 60.5,
            deadline: "2030-01-01".into(),
            progress: 30.25,
            created_at: "2026-01-01T00:00:00Z".into(),
        };
        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["type"], "endurance");
        assert_eq!(value["createdAt"], "2026-01-01T00:00:00Z");
        assert_eq!(value["progress"], 30.25);
    }

    #[test]
    fn workout_parses_stored_json() {
        let raw = r#"{"id":1,"name":"Yoga Flow","type":"flexibility","duration":60,"description":"Gentle","calories":200}"#;
        let workout: Workout = serde_json::from_str(raw).unwrap();
        assert_eq!(workout.kind, "flexibility");
        assert_eq!(workout.duration, 60);
    }

    #[test]
    fn unknown_goal_type_has_no_unit() {
        assert_eq!(goal_unit("weight"), "kg");
        assert_eq!(goal_unit("flexibility"), "inches");
        assert_eq!(goal_unit("swimming"), "");
    }

    #[test]
    fn parse_number_rejects_text_and_infinity() {
        assert_eq!(parse_number("progress", " 4.5 ").unwrap(), 4.5);
        assert_eq!(parse_number("progress", "-2").unwrap(), -2.0);
        assert!(parse_number("progress", "abc").is_err());
        assert!(parse_number("progress", "inf").is_err());
        assert!(parse_number("progress", "NaN").is_err());
    }

    #[test]
    fn number_input_accepts_both_shapes() {
        let numeric: ProgressRequest = serde_json::from_str(r#"{"progress": 3}"#).unwrap();
        assert_eq!(numeric.progress.parse("progress").unwrap(), 3.0);
        let text: ProgressRequest = serde_json::from_str(r#"{"progress": "oops"}"#).unwrap();
        assert!(text.progress.parse("progress").is_err());
    }

    #[test]
    fn json_duration_must_be_whole_minutes() {
        let parse = |raw: &str| {
            serde_json::from_str::<WorkoutRequest>(raw)
                .unwrap()
                .into_draft()
                .map(|draft| draft.duration)
        };
        assert_eq!(parse(r#"{"name":"a","type":"cardio","duration":30}"#).unwrap(), 30);
        assert_eq!(parse(r#"{"name":"a","type":"cardio","duration":"45"}"#).unwrap(), 45);
        for bad in [r#""abc""#, "30.5"] {
            let raw = format!(r#"{{"name":"a","type":"cardio","duration":{bad}}}"#);
            assert!(matches!(
                parse(raw.as_str()),
                Err(StoreError::Validation { field: "duration", .. })
            ));
        }
    }

    #[test]
    fn json_patch_leaves_missing_duration_alone() {
        let patch: WorkoutPatchRequest = serde_json::from_str(r#"{"name":"Walk"}"#).unwrap();
        let patch = patch.into_patch().unwrap();
        assert_eq!(patch.duration, None);
        assert_eq!(patch.name.as_deref(), Some("Walk"));

        let bad: WorkoutPatchRequest = serde_json::from_str(r#"{"duration":2.5}"#).unwrap();
        assert!(bad.into_patch().is_err());
    }

    #[test]
    fn filter_all_means_everything() {
        let query = FilterQuery {
            kind: Some("all".into()),
        };
        assert_eq!(query.category(), None);
        let query = FilterQuery {
            kind: Some("cardio".into()),
        };
        assert_eq!(query.category(), Some("cardio"));
    }
}
