use std::slice::Iter;

/// Aggregation key for weekly volume and classification target for the
/// advisory gateway. Closed set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
}

impl MuscleGroup {
    pub fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 6] = [
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Legs,
            MuscleGroup::Shoulders,
            MuscleGroup::Arms,
            MuscleGroup::Core,
        ];
        MUSCLE_GROUPS.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Core => "Core",
        }
    }
}

impl TryFrom<&str> for MuscleGroup {
    type Error = MuscleGroupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MuscleGroup::iter()
            .find(|m| m.name().eq_ignore_ascii_case(value.trim()))
            .copied()
            .ok_or(MuscleGroupError::Invalid)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleGroupError {
    #[error("Invalid muscle group")]
    Invalid,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_muscle_group_name() {
        let mut names = HashSet::new();

        for muscle_group in MuscleGroup::iter() {
            let name = muscle_group.name();

            assert!(!name.is_empty());
            assert!(!names.contains(name));

            names.insert(name);
        }
    }

    #[test]
    fn test_muscle_group_try_from_str() {
        for muscle_group in MuscleGroup::iter() {
            assert_eq!(
                MuscleGroup::try_from(muscle_group.name()),
                Ok(*muscle_group)
            );
            assert_eq!(
                MuscleGroup::try_from(muscle_group.name().to_lowercase().as_str()),
                Ok(*muscle_group)
            );
        }

        assert_eq!(
            MuscleGroup::try_from("Cardio"),
            Err(MuscleGroupError::Invalid)
        );
    }
}
