//! Screening stages and the fixed interview sequence.
//!
//! Stages advance strictly forward through the collection order, branch into
//! technical questions after the tech stack is collected, and reach the
//! conclusion when the question set is exhausted. `Exited` is reachable from
//! every stage and is terminal.

use serde::{Deserialize, Serialize};

/// The current position in the fixed information-collection sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Opening message; no field is collected here.
    Greeting,
    CollectName,
    CollectEmail,
    CollectPhone,
    CollectExperience,
    CollectPosition,
    CollectLocation,
    CollectTechStack,
    /// Technology-specific questions drawn from the bank or generated.
    TechQuestions,
    /// Summary emitted; no further field mutation.
    Conclusion,
    /// Terminal. Reached via exit keywords from any stage.
    Exited,
}

/// All stages in conversation order. Index in this slice defines progress.
pub const STAGE_ORDER: [Stage; 11] = [
    Stage::Greeting,
    Stage::CollectName,
    Stage::CollectEmail,
    Stage::CollectPhone,
    Stage::CollectExperience,
    Stage::CollectPosition,
    Stage::CollectLocation,
    Stage::CollectTechStack,
    Stage::TechQuestions,
    Stage::Conclusion,
    Stage::Exited,
];

/// The candidate-record field a collection stage fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Experience,
    Position,
    Location,
    TechStack,
}

impl Field {
    /// Human-readable label used in prompts and re-asks.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "full name",
            Self::Email => "email address",
            Self::Phone => "phone number",
            Self::Experience => "years of experience",
            Self::Position => "desired position",
            Self::Location => "current location",
            Self::TechStack => "tech stack",
        }
    }
}

impl Stage {
    /// Returns the immediate successor in the fixed order.
    ///
    /// Terminal stages return themselves; there are no backward transitions
    /// and no skipping.
    pub fn successor(&self) -> Self {
        match self {
            Self::Greeting => Self::CollectName,
            Self::CollectName => Self::CollectEmail,
            Self::CollectEmail => Self::CollectPhone,
            Self::CollectPhone => Self::CollectExperience,
            Self::CollectExperience => Self::CollectPosition,
            Self::CollectPosition => Self::CollectLocation,
            Self::CollectLocation => Self::CollectTechStack,
            Self::CollectTechStack => Self::TechQuestions,
            Self::TechQuestions => Self::Conclusion,
            Self::Conclusion => Self::Conclusion,
            Self::Exited => Self::Exited,
        }
    }

    /// Returns the field this stage collects, if it is a collection stage.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::CollectName => Some(Field::Name),
            Self::CollectEmail => Some(Field::Email),
            Self::CollectPhone => Some(Field::Phone),
            Self::CollectExperience => Some(Field::Experience),
            Self::CollectPosition => Some(Field::Position),
            Self::CollectLocation => Some(Field::Location),
            Self::CollectTechStack => Some(Field::TechStack),
            _ => None,
        }
    }

    /// Returns true for the COLLECT_* stages.
    pub fn is_collection(&self) -> bool {
        self.field().is_some()
    }

    /// Returns true once no further turns will be processed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exited)
    }

    /// Zero-based index of this stage in the fixed order.
    pub fn index(&self) -> usize {
        STAGE_ORDER
            .iter()
            .position(|s| s == self)
            .expect("stage present in STAGE_ORDER")
    }

    /// Total number of stages, for progress reporting.
    pub fn count() -> usize {
        STAGE_ORDER.len()
    }

    /// Fraction of the interview completed, for progress indicators.
    pub fn progress_fraction(&self) -> f32 {
        self.index() as f32 / Self::count() as f32
    }

    /// Short label for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Greeting => "Greeting",
            Self::CollectName => "Name",
            Self::CollectEmail => "Email",
            Self::CollectPhone => "Phone",
            Self::CollectExperience => "Experience",
            Self::CollectPosition => "Position",
            Self::CollectLocation => "Location",
            Self::CollectTechStack => "Tech Stack",
            Self::TechQuestions => "Technical Questions",
            Self::Conclusion => "Conclusion",
            Self::Exited => "Ended",
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Greeting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod ordering {
        use super::*;

        #[test]
        fn default_stage_is_greeting() {
            assert_eq!(Stage::default(), Stage::Greeting);
        }

        #[test]
        fn successor_walks_the_full_collection_order() {
            let mut stage = Stage::Greeting;
            let expected = [
                Stage::CollectName,
                Stage::CollectEmail,
                Stage::CollectPhone,
                Stage::CollectExperience,
                Stage::CollectPosition,
                Stage::CollectLocation,
                Stage::CollectTechStack,
                Stage::TechQuestions,
                Stage::Conclusion,
            ];
            for next in expected {
                stage = stage.successor();
                assert_eq!(stage, next);
            }
        }

        #[test]
        fn conclusion_does_not_advance() {
            assert_eq!(Stage::Conclusion.successor(), Stage::Conclusion);
        }

        #[test]
        fn exited_is_terminal() {
            assert!(Stage::Exited.is_terminal());
            assert_eq!(Stage::Exited.successor(), Stage::Exited);
        }

        #[test]
        fn only_exited_is_terminal() {
            for stage in STAGE_ORDER {
                assert_eq!(stage.is_terminal(), stage == Stage::Exited);
            }
        }

        #[test]
        fn indices_are_strictly_increasing_along_successors() {
            let mut stage = Stage::Greeting;
            while stage != Stage::Conclusion {
                let next = stage.successor();
                assert!(next.index() > stage.index());
                stage = next;
            }
        }
    }

    mod fields {
        use super::*;

        #[test]
        fn collection_stages_name_their_field() {
            assert_eq!(Stage::CollectName.field(), Some(Field::Name));
            assert_eq!(Stage::CollectTechStack.field(), Some(Field::TechStack));
            assert!(Stage::CollectEmail.is_collection());
        }

        #[test]
        fn non_collection_stages_have_no_field() {
            assert_eq!(Stage::Greeting.field(), None);
            assert_eq!(Stage::TechQuestions.field(), None);
            assert_eq!(Stage::Conclusion.field(), None);
            assert_eq!(Stage::Exited.field(), None);
        }

        #[test]
        fn every_field_has_a_label() {
            for stage in STAGE_ORDER {
                if let Some(field) = stage.field() {
                    assert!(!field.label().is_empty());
                }
            }
        }
    }

    mod progress {
        use super::*;

        #[test]
        fn greeting_is_zero_progress() {
            assert_eq!(Stage::Greeting.progress_fraction(), 0.0);
        }

        #[test]
        fn progress_stays_within_unit_interval() {
            for stage in STAGE_ORDER {
                let p = stage.progress_fraction();
                assert!((0.0..1.0).contains(&p), "{:?} -> {}", stage, p);
            }
        }

        #[test]
        fn progress_increases_with_stage_index() {
            assert!(
                Stage::CollectEmail.progress_fraction() > Stage::CollectName.progress_fraction()
            );
            assert!(Stage::Conclusion.progress_fraction() > Stage::TechQuestions.progress_fraction());
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&Stage::CollectTechStack).unwrap();
            assert_eq!(json, "\"collect_tech_stack\"");
        }

        #[test]
        fn deserializes_from_snake_case() {
            let stage: Stage = serde_json::from_str("\"tech_questions\"").unwrap();
            assert_eq!(stage, Stage::TechQuestions);
        }
    }
}
