//! Error types for the messaging model

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when building an attachment from a file
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// No file exists at the given path
    #[error("no file found at {path}")]
    NotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// The file exists but its content could not be read
    #[error("failed to read attachment content from {path}")]
    Read {
        /// The path that was read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Error returned when a non-image attachment is added as an embedded image
#[derive(Debug, Error)]
#[error("MIME type must start with 'image/', was: {mime_type}")]
pub struct InvalidMimeTypeError {
    /// The rejected MIME type
    pub mime_type: String,
}

/// Errors that can occur when transmitting a payload to the provider
#[derive(Debug, Error)]
pub enum SendError {
    /// The provider rejected the request
    #[error("provider rejected the request ({status}): {body}")]
    Provider {
        /// HTTP status code returned by the provider
        status: u16,
        /// Response body, passed through unmodified
        body: String,
    },

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
