//! Fluent template message facade.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::Value;

use crate::domain::messaging::RecipientType;

/// Fluent accumulator for a template notification: template name, sender
/// and reply-to pairs, recipient tuples, attachment paths and merge data.
///
/// This is the shape the notification layer works with; the
/// [`TemplateChannel`] converts it into the core model.
///
/// [`TemplateChannel`]: crate::domain::notifications::TemplateChannel
#[derive(Debug, Clone, Default)]
pub struct TemplateMessage {
    pub(crate) template: Option<String>,
    pub(crate) subject: Option<String>,
    pub(crate) from: Option<(String, Option<String>)>,
    pub(crate) reply_to: Option<(String, Option<String>)>,
    pub(crate) recipients: Vec<(String, Option<String>, RecipientType)>,
    pub(crate) attachments: Vec<(PathBuf, Option<String>)>,
    pub(crate) data: IndexMap<String, Value>,
}

impl TemplateMessage {
    /// Create an empty template message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template name.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Set the message subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the from address.
    pub fn from(mut self, address: impl Into<String>, name: Option<String>) -> Self {
        self.from = Some((address.into(), name));
        self
    }

    /// Set the reply-to address.
    pub fn reply_to(mut self, address: impl Into<String>, name: Option<String>) -> Self {
        self.reply_to = Some((address.into(), name));
        self
    }

    /// Add a recipient address.
    pub fn to(mut self, address: impl Into<String>, name: Option<String>) -> Self {
        self.recipients
            .push((address.into(), name, RecipientType::To));
        self
    }

    /// Add a cc recipient.
    pub fn cc(mut self, address: impl Into<String>, name: Option<String>) -> Self {
        self.recipients
            .push((address.into(), name, RecipientType::Cc));
        self
    }

    /// Add a bcc recipient.
    pub fn bcc(mut self, address: impl Into<String>, name: Option<String>) -> Self {
        self.recipients
            .push((address.into(), name, RecipientType::Bcc));
        self
    }

    /// Attach a file to the message, optionally overriding its name.
    pub fn attach(mut self, path: impl Into<PathBuf>, name: Option<String>) -> Self {
        self.attachments.push((path.into(), name));
        self
    }

    /// Add a single merge variable value.
    pub fn with(mut self, name: impl Into<String>, content: impl Into<Value>) -> Self {
        self.data.insert(name.into(), content.into());
        self
    }

    /// Replace the merge variable data with key/value entries.
    pub fn set_data(mut self, data: IndexMap<String, Value>) -> Self {
        self.data = data;
        self
    }
}
