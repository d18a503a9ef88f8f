use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Nothing to pack")]
    Empty,
    #[error("Source `{0}` has zero width or height")]
    EmptySource(String),
}

pub type Result<T> = std::result::Result<T, PackError>;
