//! Talent Screen - Guided Technical-Screening Dialogue Engine
//!
//! This crate implements a staged candidate-screening conversation:
//! field-by-field information collection with validation, followed by
//! technology-specific questions drawn from a question bank or generated
//! by an LLM backend.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
