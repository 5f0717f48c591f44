use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, ExerciseID, ReadError};

#[allow(async_fn_in_trait)]
pub trait SetLogRepository {
    async fn read_sets(&self) -> Result<Vec<SetLog>, ReadError>;
    /// Insert-only. Existing rows are never updated.
    async fn append_sets(&self, sets: Vec<SetLog>) -> Result<(), CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait SetLogService {
    async fn get_sets(&self) -> Result<Vec<SetLog>, ReadError>;
    async fn append_sets(&self, sets: Vec<SetLog>) -> Result<(), CreateError>;
}

/// One set, either still planned (`completed = false`, part of an
/// in-progress session, held only in memory) or historical
/// (`completed = true`, persisted and immutable).
#[derive(Debug, Clone, PartialEq)]
pub struct SetLog {
    pub id: SetLogID,
    pub exercise_id: ExerciseID,
    pub date: DateTime<Utc>,
    pub weight: f32,
    pub reps: u32,
    /// Fixed at creation time from the routine's target configuration.
    pub target_reps: u32,
    pub completed: bool,
}

impl SetLog {
    #[must_use]
    pub fn satisfies_target(&self) -> bool {
        self.reps >= self.target_reps
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetLogID(Uuid);

impl SetLogID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for SetLogID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetLogID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Distinct exercise ids in first-occurrence order. The order exercises were
/// added to a session is preserved when grouping its sets for display and
/// when resolving progression.
#[must_use]
pub fn exercise_order(sets: &[SetLog]) -> Vec<ExerciseID> {
    let mut result: Vec<ExerciseID> = Vec::new();
    for set in sets {
        if !result.contains(&set.exercise_id) {
            result.push(set.exercise_id);
        }
    }
    result
}

/// Best completed set of the most recent day on which `exercise_id` was
/// logged strictly before `before`.
#[must_use]
pub fn last_session_best<'a>(
    sets: &'a [SetLog],
    exercise_id: ExerciseID,
    before: DateTime<Utc>,
) -> Option<&'a SetLog> {
    let history = sets
        .iter()
        .filter(|s| s.exercise_id == exercise_id && s.completed && s.date < before)
        .collect::<Vec<_>>();
    let last_day = history.iter().map(|s| s.date.date_naive()).max()?;
    history
        .into_iter()
        .filter(|s| s.date.date_naive() == last_day)
        .max_by(|a, b| a.weight.total_cmp(&b.weight))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn set(
        id: u128,
        exercise_id: u128,
        date: DateTime<Utc>,
        weight: f32,
        reps: u32,
        completed: bool,
    ) -> SetLog {
        SetLog {
            id: id.into(),
            exercise_id: exercise_id.into(),
            date,
            weight,
            reps,
            target_reps: 10,
            completed,
        }
    }

    #[rstest]
    #[case(10, 10, true)]
    #[case(12, 10, true)]
    #[case(9, 10, false)]
    #[case(0, 0, true)]
    fn test_set_log_satisfies_target(
        #[case] reps: u32,
        #[case] target_reps: u32,
        #[case] expected: bool,
    ) {
        let set = SetLog {
            id: 1.into(),
            exercise_id: 1.into(),
            date: date(2024, 3, 4, 10),
            weight: 60.0,
            reps,
            target_reps,
            completed: true,
        };
        assert_eq!(set.satisfies_target(), expected);
    }

    #[test]
    fn test_set_log_id_nil() {
        assert!(SetLogID::nil().is_nil());
        assert_eq!(SetLogID::nil(), SetLogID::default());
    }

    #[test]
    fn test_exercise_order() {
        let sets = vec![
            set(1, 7, date(2024, 3, 4, 10), 60.0, 10, false),
            set(2, 7, date(2024, 3, 4, 10), 60.0, 10, false),
            set(3, 5, date(2024, 3, 4, 10), 40.0, 10, false),
            set(4, 7, date(2024, 3, 4, 10), 60.0, 10, false),
            set(5, 9, date(2024, 3, 4, 10), 20.0, 10, false),
        ];
        assert_eq!(
            exercise_order(&sets),
            vec![7.into(), 5.into(), 9.into()]
        );
    }

    #[test]
    fn test_last_session_best() {
        let sets = vec![
            set(1, 7, date(2024, 2, 26, 9), 60.0, 10, true),
            set(2, 7, date(2024, 2, 26, 10), 62.5, 8, true),
            set(3, 7, date(2024, 2, 19, 9), 65.0, 6, true),
            set(4, 7, date(2024, 3, 4, 9), 70.0, 5, false),
            set(5, 5, date(2024, 2, 26, 9), 40.0, 10, true),
        ];

        let best = last_session_best(&sets, 7.into(), date(2024, 3, 1, 0)).unwrap();
        assert_eq!(best.id, 2.into());

        assert!(last_session_best(&sets, 7.into(), date(2024, 2, 19, 0)).is_none());
        assert!(last_session_best(&sets, 9.into(), date(2024, 3, 1, 0)).is_none());
    }
}
