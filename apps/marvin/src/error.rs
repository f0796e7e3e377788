//! Error types for marvin operations.

use crate::checker::CheckerError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error(transparent)]
    Checker(#[from] CheckerError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),
}
