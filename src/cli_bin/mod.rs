//! Command-line layer: argument parsing and the handlers that call into the library

pub mod args;
pub mod commands;
