//! Crate-level error types.

use std::fmt;

/// Errors produced by the pmw-view crate.
#[derive(Debug)]
pub enum PmwError {
    /// The request never produced an HTTP response.
    Transport(String),
    /// The backend answered with a non-success status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Reason phrase sent with the status.
        status_text: String,
    },
    /// A payload did not match the expected schema.
    Decode(serde_json::Error),
    /// A project payload carried no proteins.
    EmptyProject(String),
    /// A PDB record could not be read.
    StructureParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML config parsing/serialization failure.
    OptionsParse(String),
}

impl PmwError {
    /// Message shown to the user in a danger alert.
    #[must_use]
    pub fn alert_message(&self) -> String {
        match self {
            Self::Status {
                status,
                status_text,
            } => format!("failed with [{status}] {status_text}"),
            other => format!("failed: {other}"),
        }
    }
}

impl fmt::Display for PmwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Status {
                status,
                status_text,
            } => write!(f, "HTTP {status} {status_text}"),
            Self::Decode(e) => write!(f, "payload decode error: {e}"),
            Self::EmptyProject(id) => {
                write!(f, "project {id} contains no proteins")
            }
            Self::StructureParse(msg) => write!(f, "PDB parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for PmwError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PmwError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e)
    }
}

impl From<std::io::Error> for PmwError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
