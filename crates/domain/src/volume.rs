use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDateTime, NaiveTime, TimeZone};

use crate::{Exercise, ExerciseID, MuscleGroup, SetLog, UserSettings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyVolume {
    pub muscle_group: MuscleGroup,
    pub count: u32,
    pub goal: u32,
}

/// Most recent Monday at 00:00:00 in `now`'s timezone. Sunday counts as the
/// end of the week, not the start: on a Sunday the window reaches six days
/// back.
#[must_use]
pub fn week_start<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDateTime {
    let date = now.date_naive();
    let days_back = u64::from(date.weekday().num_days_from_monday());
    (date - Days::new(days_back)).and_time(NaiveTime::MIN)
}

/// Completed sets since the start of the week, counted per muscle group.
/// Pure function of its inputs; the output covers every muscle group, never
/// a sparse result.
#[must_use]
pub fn weekly_volume<Tz: TimeZone>(
    sets: &[SetLog],
    exercises: &BTreeMap<ExerciseID, Exercise>,
    settings: &UserSettings,
    now: &DateTime<Tz>,
) -> Vec<WeeklyVolume> {
    let start = week_start(now);
    let mut counts: BTreeMap<MuscleGroup, u32> =
        MuscleGroup::iter().map(|m| (*m, 0)).collect();

    for set in sets {
        if !set.completed {
            continue;
        }
        // Inclusive boundary: a set logged exactly at the week start counts.
        if set.date.with_timezone(&now.timezone()).naive_local() < start {
            continue;
        }
        if let Some(exercise) = exercises.get(&set.exercise_id) {
            *counts.entry(exercise.muscle_group).or_insert(0) += 1;
        }
    }

    MuscleGroup::iter()
        .map(|muscle_group| WeeklyVolume {
            muscle_group: *muscle_group,
            count: counts[muscle_group],
            goal: settings.volume_goal(*muscle_group),
        })
        .collect()
}
