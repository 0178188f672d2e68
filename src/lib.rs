//! Library entry point for the vulnsweep CLI.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod model;
pub mod process;
pub mod report;
pub mod runtime;
pub mod scanner;
