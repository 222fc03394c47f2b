//! Command modules for the ClinicCheck CLI.
//!
//! This module contains all the command implementations for the CLI
//! application. Each submodule handles a specific command:
//!
//! - `init_cmd`: Writes a default configuration file
//! - `run_cmd`: Runs the end-to-end check flow against the clinic API

pub mod init_cmd;
pub mod run_cmd;
