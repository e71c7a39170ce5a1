use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitvizError>;

#[derive(Error, Debug)]
pub enum GitvizError {
    #[error("Not a git repository: {}", .0.display())]
    InvalidRepository(PathBuf),
    #[error("{0}")]
    Command(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
