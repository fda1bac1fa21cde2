//! Error types for the live annotator library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A cascade detector model failed to load
    #[error("Cascade load error: {0}")]
    CascadeLoad(String),

    /// The capture source could not be opened
    #[error("Camera open error: {0}")]
    CameraOpen(String),

    /// A single frame acquisition failed
    #[error("Frame read error: {0}")]
    FrameRead(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
