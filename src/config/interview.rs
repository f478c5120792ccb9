//! Interview shape configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Interview shape: question-set bounds and presentation identity.
///
/// Supplied once at session construction and immutable for the session
/// lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewConfig {
    /// Minimum total technical questions per session
    #[serde(default = "default_min_questions")]
    pub min_questions: usize,

    /// Maximum total technical questions per session
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,

    /// Bank questions sampled per declared technology
    #[serde(default = "default_per_tech")]
    pub per_tech_questions: usize,

    /// Company name used in assistant phrasing
    #[serde(default = "default_company")]
    pub company_name: String,
}

impl InterviewConfig {
    /// Validate interview configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_questions == 0 || self.max_questions == 0 {
            return Err(ValidationError::QuestionBoundZero);
        }
        if self.min_questions > self.max_questions {
            return Err(ValidationError::QuestionBoundsInverted);
        }
        if self.per_tech_questions == 0 {
            return Err(ValidationError::PerTechQuestionsZero);
        }
        Ok(())
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            min_questions: default_min_questions(),
            max_questions: default_max_questions(),
            per_tech_questions: default_per_tech(),
            company_name: default_company(),
        }
    }
}

fn default_min_questions() -> usize {
    3
}

fn default_max_questions() -> usize {
    5
}

fn default_per_tech() -> usize {
    2
}

fn default_company() -> String {
    "TalentScout".to_string()
}
