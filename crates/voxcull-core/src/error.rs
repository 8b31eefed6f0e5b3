//! Engine error type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Text that could not be parsed into the expected shape.
    #[error("malformed document: {0}")]
    Serialization(String),

    /// A parsed value outside its allowed range.
    #[error("bad config value: {0}")]
    Config(String),

    #[error("invalid value: {0}")]
    InvalidData(String),

    /// The entity is gone or lacks a component.
    #[error("entity access failed: {0}")]
    Entity(String),
}

pub type Result<T> = std::result::Result<T, Error>;
