use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Failed to open process: {0}")]
    ProcessOpenFailed(String),

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Partial read at address {address:#x}: expected {expected} bytes, got {actual}")]
    PartialRead {
        address: u64,
        expected: usize,
        actual: usize,
    },

    #[error("Null pointer read at address {address:#x}")]
    NullPointer { address: u64 },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Startup failures: the target could not be located or opened.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Error::ProcessNotFound(_) | Error::ModuleNotFound(_) | Error::ProcessOpenFailed(_)
        )
    }

    /// Failures that abort a single traversal pass.
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            Error::MemoryReadFailed { .. }
                | Error::PartialRead { .. }
                | Error::NullPointer { .. }
                | Error::Decode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
