//! Error types for notification dispatch

use thiserror::Error;

use crate::domain::messaging::{AttachmentError, SendError};

/// Errors that can occur when dispatching a template notification
#[derive(Debug, Error)]
pub enum SendTemplateError {
    /// No template name was set on the message; detected before any network
    /// call is attempted
    #[error("no template was specified for the message")]
    MissingTemplate,

    /// An attachment could not be built from its file
    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    /// The provider transport failed
    #[error(transparent)]
    Send(#[from] SendError),
}
