//! Domain layer: pure types and logic, free of I/O.

pub mod foundation;
pub mod screening;
