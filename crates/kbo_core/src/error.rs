use std::fmt;

#[derive(Debug)]
pub enum MatrixError {
    InvalidParameter(String),
    SerializationError(String),
    DeserializationError(String),
    LocalizationError(String),
    IoError(String),
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            MatrixError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            MatrixError::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
            MatrixError::LocalizationError(msg) => write!(f, "Localization error: {}", msg),
            MatrixError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for MatrixError {}

pub type Result<T> = std::result::Result<T, MatrixError>;
