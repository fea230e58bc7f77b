//! MediShare CLI - Command-line front end for the MediShare ranking engine
//!
//! This crate provides the CLI application that ties the record store and the core together.

pub mod config;
pub mod output;

pub use config::{Command, Config, OutputFormat, SortKey};
