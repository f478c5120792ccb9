//! Candidate record accumulated over the screening conversation.
//!
//! A field is present only after the validator accepted the answer given at
//! the corresponding stage. The record is owned exclusively by the
//! conversation manager; nothing else mutates it.

use serde::{Deserialize, Serialize};

use super::stage::Field;
use super::validator::FieldValue;

/// Validated answers keyed by field, populated incrementally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience_years: Option<u8>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub tech_stack: Option<Vec<String>>,
}

impl CandidateRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a validated value under its field.
    ///
    /// The validator guarantees the value variant matches the field, so a
    /// mismatch here is a programming error and the value is dropped.
    pub fn store(&mut self, field: Field, value: FieldValue) {
        match (field, value) {
            (Field::Name, FieldValue::Text(v)) => self.name = Some(v),
            (Field::Email, FieldValue::Text(v)) => self.email = Some(v),
            (Field::Phone, FieldValue::Text(v)) => self.phone = Some(v),
            (Field::Experience, FieldValue::Years(v)) => self.experience_years = Some(v),
            (Field::Position, FieldValue::Text(v)) => self.position = Some(v),
            (Field::Location, FieldValue::Text(v)) => self.location = Some(v),
            (Field::TechStack, FieldValue::Technologies(v)) => self.tech_stack = Some(v),
            (field, value) => {
                tracing::error!(?field, ?value, "field/value mismatch, value dropped");
            }
        }
    }

    /// Returns the declared technologies, empty if not yet collected.
    pub fn technologies(&self) -> &[String] {
        self.tech_stack.as_deref().unwrap_or(&[])
    }

    /// Returns true once every field has been collected.
    pub fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.email.is_some()
            && self.phone.is_some()
            && self.experience_years.is_some()
            && self.position.is_some()
            && self.location.is_some()
            && self.tech_stack.is_some()
    }

    /// Human-readable recap of everything collected so far.
    ///
    /// Used in the conclusion message and as generation context.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if let Some(v) = &self.name {
            lines.push(format!("- Full Name: {}", v));
        }
        if let Some(v) = &self.email {
            lines.push(format!("- Email Address: {}", v));
        }
        if let Some(v) = &self.phone {
            lines.push(format!("- Phone Number: {}", v));
        }
        if let Some(v) = self.experience_years {
            lines.push(format!("- Years of Experience: {}", v));
        }
        if let Some(v) = &self.position {
            lines.push(format!("- Desired Position: {}", v));
        }
        if let Some(v) = &self.location {
            lines.push(format!("- Current Location: {}", v));
        }
        if let Some(v) = &self.tech_stack {
            lines.push(format!("- Tech Stack: {}", v.join(", ")));
        }
        lines.join("\n")
    }

    /// Clears every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
