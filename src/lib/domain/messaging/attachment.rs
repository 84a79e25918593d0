//! Message attachment entity.

use std::{fs, path::Path};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::domain::messaging::errors::AttachmentError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Message attachment entity. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    mime_type: String,
    name: String,
    content: String,
}

impl Attachment {
    /// Create an attachment from already base64-encoded content.
    ///
    /// The content is stored as-is; it is not checked for valid base64.
    pub fn new(
        mime_type: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// Create an attachment from a file on disk.
    ///
    /// The MIME type is detected from the file's content, falling back to
    /// an extension lookup and finally to `application/octet-stream`. When
    /// no `name` is given, the file's base name is used. The raw bytes are
    /// base64-encoded.
    ///
    /// # Errors
    /// [`AttachmentError::NotFound`] if no file exists at `path`,
    /// [`AttachmentError::Read`] if its content could not be read.
    pub fn from_file(
        path: impl AsRef<Path>,
        name: Option<String>,
    ) -> Result<Self, AttachmentError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AttachmentError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|source| AttachmentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mime_type = match infer::get(&bytes) {
            Some(kind) => kind.mime_type().to_string(),
            None => mime_guess::from_path(path)
                .first_raw()
                .unwrap_or(FALLBACK_MIME)
                .to_string(),
        };

        let name = name.unwrap_or_else(|| {
            path.file_name()
                .map(|base| base.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        Ok(Self::new(mime_type, name, STANDARD.encode(&bytes)))
    }

    /// Get the attachment's MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Get the attachment's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the attachment's content as a base64-encoded string.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Produce the attachment's wire form.
    pub fn to_payload(&self) -> AttachmentPayload {
        AttachmentPayload {
            mime_type: self.mime_type.clone(),
            name: self.name.clone(),
            content: self.content.clone(),
        }
    }
}

/// Wire form of an attachment or embedded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPayload {
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,

    /// File name shown to the recipient.
    pub name: String,

    /// Base64-encoded content.
    pub content: String,
}
