//! Application layer: orchestrates the screening conversation over the
//! domain model and the generation port.

pub mod prompts;
pub mod session;

pub use session::{ConversationManager, TurnOutcome, EXIT_KEYWORDS};
