//! Screening domain: the staged interview state machine and its data.

pub mod candidate;
pub mod message;
pub mod question;
pub mod question_bank;
pub mod stage;
pub mod validator;

pub use candidate::CandidateRecord;
pub use message::{Message, MessageId, Role, Transcript};
pub use question::QuestionSet;
pub use stage::{Field, Stage, STAGE_ORDER};
pub use validator::{validate, FieldError, FieldValue};
