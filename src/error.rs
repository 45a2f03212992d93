use std::io;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("move queue is full ({0} commands pending)")]
    QueueFull(usize),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("could not parse board: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
