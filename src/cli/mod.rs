//! Command Line Interface (CLI) layer for NLCDPAD.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that merges a config file with
//! command-line overrides and runs the fusion.
//!
//! If you are embedding NLCDPAD into another application, prefer using
//! the high-level `nlcdpad::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
