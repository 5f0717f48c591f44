use serde_json::Value;

use crate::{Exercise, MuscleGroup, ReadError, SetTarget, WeeklyVolume};

pub const DEFAULT_SUGGESTED_WEIGHT: f32 = 20.0;

pub static GENERIC_FORM_TIPS: &[&str] = &[
    "Brace your core and keep every rep controlled.",
    "Use a full range of motion at a weight you can manage.",
    "Keep one or two reps in reserve on all but the last set.",
];

pub static FALLBACK_COACH_INSIGHT: &str =
    "Focus on progressive overload and hitting your weekly volume goals.";

/// Opaque text and classification calls against a generative service. All
/// fallible; the service layer recovers with fixed fallbacks and never lets
/// an advisory failure block the workflow.
#[allow(async_fn_in_trait)]
pub trait AdvisoryRepository {
    async fn classify_exercise(&self, input: &str) -> Result<ExerciseClassification, ReadError>;
    async fn suggest_alternatives(
        &self,
        exercise_name: &str,
        muscle_group: MuscleGroup,
    ) -> Result<Vec<Alternative>, ReadError>;
    async fn form_tips(&self, exercise_name: &str) -> Result<Vec<String>, ReadError>;
    async fn generate_routine(&self, prompt: &str) -> Result<RoutineDraft, ReadError>;
    async fn coach_insight(&self, volumes: &[WeeklyVolume]) -> Result<String, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait AdvisoryService {
    async fn classify_exercise(&self, input: &str) -> ExerciseClassification;
    async fn suggest_alternatives(&self, exercise: &Exercise) -> Vec<Alternative>;
    async fn form_tips(&self, exercise: &Exercise) -> Vec<String>;
    async fn generate_routine_draft(&self, prompt: &str) -> RoutineDraft;
    async fn coach_insight(&self, volumes: &[WeeklyVolume]) -> String;
}

/// Free-text exercise input classified into the fixed exercise shape. The
/// name stays a plain string until an `Exercise` is actually created.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseClassification {
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub suggested_weight: f32,
}

impl ExerciseClassification {
    #[must_use]
    pub fn fallback(input: &str) -> Self {
        Self {
            name: input.trim().to_string(),
            muscle_group: MuscleGroup::Chest,
            suggested_weight: DEFAULT_SUGGESTED_WEIGHT,
        }
    }

    /// Validating decoder for the externally supplied payload: every
    /// missing or invalid field is replaced by its default.
    #[must_use]
    pub fn decode(value: &Value, input: &str) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(input.trim())
            .to_string();
        let muscle_group = value
            .get("muscleGroup")
            .and_then(Value::as_str)
            .and_then(|muscle_group| MuscleGroup::try_from(muscle_group).ok())
            .unwrap_or(MuscleGroup::Chest);
        #[allow(clippy::cast_possible_truncation)]
        let suggested_weight = value
            .get("suggestedWeight")
            .and_then(Value::as_f64)
            .map(|weight| weight as f32)
            .filter(|weight| weight.is_finite() && *weight > 0.0)
            .unwrap_or(DEFAULT_SUGGESTED_WEIGHT);
        Self {
            name,
            muscle_group,
            suggested_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    pub name: String,
    pub reason: String,
}

impl Alternative {
    /// Entries without a usable name are dropped; a missing reason is kept
    /// as an empty string.
    #[must_use]
    pub fn decode_list(value: &Value) -> Vec<Alternative> {
        value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        let name = item.get("name")?.as_str()?.trim();
                        if name.is_empty() {
                            return None;
                        }
                        Some(Alternative {
                            name: name.to_string(),
                            reason: item
                                .get("reason")
                                .and_then(Value::as_str)
                                .unwrap_or_default()
                                .to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[must_use]
pub fn decode_form_tips(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|tip| !tip.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// A whole synthesized routine, not yet resolved against the exercise
/// catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineDraft {
    pub name: String,
    pub exercises: Vec<DraftExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftExercise {
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub suggested_weight: f32,
    pub target: SetTarget,
}

impl RoutineDraft {
    pub const FALLBACK_NAME: &'static str = "Generated Routine";

    #[must_use]
    pub fn fallback() -> Self {
        Self {
            name: Self::FALLBACK_NAME.to_string(),
            exercises: Vec::new(),
        }
    }

    #[must_use]
    pub fn decode(value: &Value) -> Self {
        let name = value
            .get("routineName")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(Self::FALLBACK_NAME)
            .to_string();
        let exercises = value
            .get("exercises")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        let name = item.get("name")?.as_str()?.trim();
                        if name.is_empty() {
                            return None;
                        }
                        let classification = ExerciseClassification::decode(item, name);
                        Some(DraftExercise {
                            name: classification.name,
                            muscle_group: classification.muscle_group,
                            suggested_weight: classification.suggested_weight,
                            target: SetTarget {
                                sets: decode_count(item, "targetSets", SetTarget::default().sets),
                                reps: decode_count(item, "targetReps", SetTarget::default().reps),
                            },
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { name, exercises }
    }
}

fn decode_count(value: &Value, key: &str, default: u32) -> u32 {
    value
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|count| u32::try_from(count).ok())
        .filter(|count| *count > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_exercise_classification_decode() {
        let value = json!({
            "name": " Incline Bench Press ",
            "muscleGroup": "Chest",
            "suggestedWeight": 42.5,
        });

        assert_eq!(
            ExerciseClassification::decode(&value, "incline bench"),
            ExerciseClassification {
                name: "Incline Bench Press".to_string(),
                muscle_group: MuscleGroup::Chest,
                suggested_weight: 42.5,
            }
        );
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"name": "", "muscleGroup": "Cardio", "suggestedWeight": 0}))]
    #[case(json!({"name": 7, "muscleGroup": 3, "suggestedWeight": -15.0}))]
    #[case(json!("not an object"))]
    fn test_exercise_classification_decode_invalid_fields(#[case] value: Value) {
        assert_eq!(
            ExerciseClassification::decode(&value, " hammer curl "),
            ExerciseClassification {
                name: "hammer curl".to_string(),
                muscle_group: MuscleGroup::Chest,
                suggested_weight: DEFAULT_SUGGESTED_WEIGHT,
            }
        );
    }

    #[test]
    fn test_exercise_classification_fallback() {
        assert_eq!(
            ExerciseClassification::fallback("hammer curl"),
            ExerciseClassification {
                name: "hammer curl".to_string(),
                muscle_group: MuscleGroup::Chest,
                suggested_weight: DEFAULT_SUGGESTED_WEIGHT,
            }
        );
    }

    #[test]
    fn test_alternative_decode_list() {
        let value = json!([
            {"name": "Dumbbell Press", "reason": "Same movement pattern"},
            {"name": "", "reason": "dropped"},
            {"reason": "no name, dropped"},
            {"name": "Dips"},
        ]);

        assert_eq!(
            Alternative::decode_list(&value),
            vec![
                Alternative {
                    name: "Dumbbell Press".to_string(),
                    reason: "Same movement pattern".to_string(),
                },
                Alternative {
                    name: "Dips".to_string(),
                    reason: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_alternative_decode_list_not_an_array() {
        assert_eq!(Alternative::decode_list(&json!({"name": "X"})), vec![]);
    }

    #[test]
    fn test_decode_form_tips() {
        let value = json!(["Keep your elbows tucked.", "", 7, " Control the negative. "]);

        assert_eq!(
            decode_form_tips(&value),
            vec![
                "Keep your elbows tucked.".to_string(),
                "Control the negative.".to_string(),
            ]
        );
        assert_eq!(decode_form_tips(&json!(null)), Vec::<String>::new());
    }

    #[test]
    fn test_routine_draft_decode() {
        let value = json!({
            "routineName": "Upper Body Blast",
            "exercises": [
                {
                    "name": "Bench Press",
                    "muscleGroup": "Chest",
                    "suggestedWeight": 60.0,
                    "targetSets": 5,
                    "targetReps": 5,
                },
                {
                    "name": "Face Pull",
                    "muscleGroup": "Shoulders",
                },
                {"name": ""},
            ],
        });

        let draft = RoutineDraft::decode(&value);

        assert_eq!(draft.name, "Upper Body Blast");
        assert_eq!(
            draft.exercises,
            vec![
                DraftExercise {
                    name: "Bench Press".to_string(),
                    muscle_group: MuscleGroup::Chest,
                    suggested_weight: 60.0,
                    target: SetTarget { sets: 5, reps: 5 },
                },
                DraftExercise {
                    name: "Face Pull".to_string(),
                    muscle_group: MuscleGroup::Shoulders,
                    suggested_weight: DEFAULT_SUGGESTED_WEIGHT,
                    target: SetTarget::default(),
                },
            ]
        );
    }

    #[test]
    fn test_routine_draft_decode_invalid() {
        let draft = RoutineDraft::decode(&json!(null));

        assert_eq!(draft, RoutineDraft::fallback());
        assert_eq!(draft.name, RoutineDraft::FALLBACK_NAME);
        assert!(draft.exercises.is_empty());
    }
}
