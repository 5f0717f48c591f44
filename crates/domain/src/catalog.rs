//! Starter catalog persisted for a user whose exercise and routine lists are
//! both empty.

use crate::MuscleGroup;

pub struct Exercise {
    pub name: &'static str,
    pub muscle_group: MuscleGroup,
    pub reference_weight: f32,
}

pub struct Routine {
    pub name: &'static str,
    pub exercise_names: &'static [&'static str],
}

pub static EXERCISES: [Exercise; 18] = [
    Exercise {
        name: "Bench Press",
        muscle_group: MuscleGroup::Chest,
        reference_weight: 60.0,
    },
    Exercise {
        name: "Incline Dumbbell Press",
        muscle_group: MuscleGroup::Chest,
        reference_weight: 22.5,
    },
    Exercise {
        name: "Dips",
        muscle_group: MuscleGroup::Chest,
        reference_weight: 0.0,
    },
    Exercise {
        name: "Deadlift",
        muscle_group: MuscleGroup::Back,
        reference_weight: 100.0,
    },
    Exercise {
        name: "Pull-ups",
        muscle_group: MuscleGroup::Back,
        reference_weight: 0.0,
    },
    Exercise {
        name: "Dumbbell Rows",
        muscle_group: MuscleGroup::Back,
        reference_weight: 24.0,
    },
    Exercise {
        name: "Lat Pulldown",
        muscle_group: MuscleGroup::Back,
        reference_weight: 50.0,
    },
    Exercise {
        name: "Squat",
        muscle_group: MuscleGroup::Legs,
        reference_weight: 80.0,
    },
    Exercise {
        name: "Leg Press",
        muscle_group: MuscleGroup::Legs,
        reference_weight: 120.0,
    },
    Exercise {
        name: "Romanian Deadlift",
        muscle_group: MuscleGroup::Legs,
        reference_weight: 60.0,
    },
    Exercise {
        name: "Calf Raises",
        muscle_group: MuscleGroup::Legs,
        reference_weight: 40.0,
    },
    Exercise {
        name: "Overhead Press",
        muscle_group: MuscleGroup::Shoulders,
        reference_weight: 40.0,
    },
    Exercise {
        name: "Lateral Raises",
        muscle_group: MuscleGroup::Shoulders,
        reference_weight: 8.0,
    },
    Exercise {
        name: "Face Pulls",
        muscle_group: MuscleGroup::Shoulders,
        reference_weight: 15.0,
    },
    Exercise {
        name: "Bicep Curls",
        muscle_group: MuscleGroup::Arms,
        reference_weight: 15.0,
    },
    Exercise {
        name: "Tricep Extensions",
        muscle_group: MuscleGroup::Arms,
        reference_weight: 20.0,
    },
    Exercise {
        name: "Hammer Curls",
        muscle_group: MuscleGroup::Arms,
        reference_weight: 12.0,
    },
    Exercise {
        name: "Plank",
        muscle_group: MuscleGroup::Core,
        reference_weight: 0.0,
    },
];

pub static ROUTINES: [Routine; 3] = [
    Routine {
        name: "Push Day",
        exercise_names: &[
            "Bench Press",
            "Overhead Press",
            "Incline Dumbbell Press",
            "Dips",
            "Lateral Raises",
            "Tricep Extensions",
        ],
    },
    Routine {
        name: "Pull Day",
        exercise_names: &[
            "Deadlift",
            "Pull-ups",
            "Dumbbell Rows",
            "Lat Pulldown",
            "Face Pulls",
            "Bicep Curls",
            "Hammer Curls",
        ],
    },
    Routine {
        name: "Leg Day",
        exercise_names: &[
            "Squat",
            "Leg Press",
            "Romanian Deadlift",
            "Calf Raises",
            "Plank",
        ],
    },
];
