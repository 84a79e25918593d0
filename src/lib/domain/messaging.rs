//! Messaging model module.

mod attachment;
mod errors;
mod message;
mod recipient;
mod sender;
mod template;
pub mod wire;

pub use attachment::{Attachment, AttachmentPayload};
pub use errors::{AttachmentError, InvalidMimeTypeError, SendError};
pub use message::{Message, MessagePayload, RecipientMergeVars, RecipientMetadata, MERGE_LANGUAGE};
pub use recipient::{Recipient, RecipientPayload, RecipientType};
pub use sender::{TemplatePayload, TemplateSender};
pub use template::{Template, TemplateData};
