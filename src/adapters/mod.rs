//! Adapters: implementations of the ports against the outside world.

pub mod ai;
