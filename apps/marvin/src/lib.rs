//! Marvin core library.
//!
//! This crate runs documentation checkers, keeps each run as a JSON record,
//! and aggregates the whole run history into an interactive dashboard.
//!
//! High-level modules:
//! - `models`: Result, issue and summary records plus dashboard aggregate types.
//! - `store`: Recursive, corruption-tolerant reader and timestamped writer for records.
//! - `aggregate`: Groups runs per checker, rolls up counters, picks latest runs.
//! - `tui`: Dashboard navigation state machine, single-result viewer, theme.
//! - `checker`: `Checker` trait with Vale and markdownlint adapters.
//! - `output`: Plain-text and JSON printers.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`, `logging`, `utils`: Supporting concerns.
pub mod aggregate;
pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod store;
pub mod tui;
pub mod utils;

pub use error::{Error, Result};
