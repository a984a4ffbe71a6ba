use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Credential errors
    #[error("Invalid digit: {0}")]
    InvalidDigit(u8),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    // Framing errors
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Frame exceeded {limit} bytes without terminator")]
    BufferOverflow { limit: usize },

    #[error("Invalid status frame: {0}")]
    InvalidStatusFrame(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
