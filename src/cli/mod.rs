//! Command-line interface module
//!
//! Handles argument parsing, option resolution, usage text and dispatch

pub mod dispatch;
pub mod help;
pub mod options;
pub mod parser;
pub mod registry;

pub use dispatch::Dispatcher;
pub use options::{LogLevel, Options};
pub use parser::parse;
pub use registry::{Action, Registry};
