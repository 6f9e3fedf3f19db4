//! nanolayer command line.
//!
//! The binary in `main.rs` is a thin shell around this library: [`cli`]
//! parses arguments and maps errors to exit codes, [`commands`] runs them and
//! [`tracing`] sets up logging.

// Command results go to stdout, diagnostics to stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod cli;
pub mod commands;
pub mod tracing;
