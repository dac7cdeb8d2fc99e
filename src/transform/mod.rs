//! Transformation
//!
//! The XSLT processor is an external collaborator: it takes a stylesheet and
//! a source document and either returns serialized output or fails with a
//! message. Nothing here retries a failed run.

pub mod command;
pub mod messages;
pub mod workbench;

use thiserror::Error;

pub use command::CommandEngine;
pub use messages::{LogEntry, MessageKind, MessageLog};
pub use workbench::Workbench;

/// Shown when a failure carries no message of its own
pub const UNKNOWN_TRANSFORM_ERROR: &str = "Unknown transformation error";

/// Failure modes of a transformation run
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("{0}")]
    Failed(String),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transformation output is not valid UTF-8")]
    InvalidOutput,
}

impl TransformError {
    /// Message for the user, never empty
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_TRANSFORM_ERROR.to_string()
        } else {
            message
        }
    }
}

/// Applies a stylesheet to a source document
pub trait TransformEngine: Send {
    fn transform(&self, stylesheet: &str, source: &str) -> Result<String, TransformError>;
}
