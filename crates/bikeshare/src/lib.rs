//! Bikeshare - explore historical US bikeshare trip data.
//!
//! This crate provides both an interactive CLI and a library for loading a
//! city's trip records, narrowing them by month and weekday, and computing
//! descriptive statistics over the result.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod stats;

// Terminal-facing modules
pub mod output;
pub mod prompt;
pub mod session;

// Public CLI module (needed by binary)
pub mod cli;
