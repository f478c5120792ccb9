//! Ports: interfaces the core requires from the outside world.

mod text_generator;

pub use text_generator::{
    BackendInfo, ContextMessage, ContextRole, GeneratedText, GenerationError, GenerationRequest,
    TextGenerator,
};
