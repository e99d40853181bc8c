//! Utility module
//!
//! Helpers for shell composition

pub mod pipe;

pub use pipe::*;
