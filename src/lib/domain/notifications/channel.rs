//! Template notification channel.

use serde_json::Value;

use crate::domain::{
    messaging::{Attachment, Message, Recipient, Template, TemplatePayload, TemplateSender},
    notifications::{errors::SendTemplateError, template_message::TemplateMessage},
};

/// Channel that turns a [`TemplateMessage`] into one template/message pair
/// and dispatches it through the configured sender.
#[derive(Debug, Clone)]
pub struct TemplateChannel<S>
where
    S: TemplateSender,
{
    sender: S,
    default_from: Option<(String, Option<String>)>,
}

impl<S> TemplateChannel<S>
where
    S: TemplateSender,
{
    /// Create a new channel around a sender.
    pub fn new(sender: S) -> Self {
        Self {
            sender,
            default_from: None,
        }
    }

    /// Set a fallback sender address, used when a message sets none.
    pub fn with_default_from(mut self, address: impl Into<String>, name: Option<String>) -> Self {
        self.default_from = Some((address.into(), name));
        self
    }

    /// Build and send the notification.
    ///
    /// The template name is required and checked before any file or network
    /// I/O happens. Attachment paths are read here; a missing or unreadable
    /// file aborts the send.
    ///
    /// # Returns
    /// The provider's response, passed through unmodified.
    pub async fn send(
        &self,
        template_message: TemplateMessage,
    ) -> Result<Value, SendTemplateError> {
        let template_name = template_message
            .template
            .ok_or(SendTemplateError::MissingTemplate)?;

        let template = Template::new(template_name);

        let mut message = Message::new();

        if let Some(subject) = template_message.subject {
            message.set_subject(subject);
        }

        if let Some((address, name)) = template_message.from.or_else(|| self.default_from.clone()) {
            message.set_from_email(address);
            if let Some(name) = name {
                message.set_from_name(name);
            }
        }

        if let Some((address, name)) = template_message.reply_to {
            message.add_header(
                "Reply-To",
                format!("{} <{}>", name.unwrap_or_default(), address),
            );
        }

        message.set_merge_vars(template_message.data);

        for (email, name, kind) in template_message.recipients {
            message.add_recipient(Recipient::new(email, name, kind));
        }

        for (path, name) in template_message.attachments {
            message.add_attachment(Attachment::from_file(&path, name)?);
        }

        let payload = TemplatePayload::new(&template, &message);

        Ok(self.sender.send_template(&payload).await?)
    }
}
