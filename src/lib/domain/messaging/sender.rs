//! Outbound seam toward the provider's template-send endpoint.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

#[cfg(test)]
use mockall::mock;

use crate::domain::messaging::{
    errors::SendError,
    message::{Message, MessagePayload},
    template::Template,
    wire::NameContent,
};

/// Complete request payload for one template send: exactly one template
/// paired with exactly one message.
///
/// `template_content` always serializes as a JSON array, with `[]` when the
/// template has no content regions. Historical clients disagreed on the
/// empty representation (`''`, `null`, omitted); the typed array is the one
/// the current API documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplatePayload {
    /// Immutable slug or name of the template to send.
    pub template_name: String,

    /// Per-send overrides for the template's editable regions.
    pub template_content: Vec<NameContent>,

    /// The full message serialization.
    pub message: MessagePayload,
}

impl TemplatePayload {
    /// Assemble the payload for a `(Template, Message)` pair.
    pub fn new(template: &Template, message: &Message) -> Self {
        let template_data = template.to_payload();

        Self {
            template_name: template_data.name,
            template_content: template_data.content,
            message: message.to_payload(),
        }
    }
}

/// Transport toward the provider.
///
/// Implementations carry credentials and networking; the core model only
/// hands over a finished [`TemplatePayload`].
#[async_trait]
pub trait TemplateSender: Clone + Send + Sync + 'static {
    /// Send a serialized template payload.
    ///
    /// # Returns
    /// The provider's response, passed through unmodified. Provider-side
    /// failures (auth, unknown template, rate limits) surface as
    /// [`SendError`].
    async fn send_template(&self, payload: &TemplatePayload) -> Result<Value, SendError>;
}

#[cfg(test)]
mock! {
    pub TemplateSender {}

    impl Clone for TemplateSender {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl TemplateSender for TemplateSender {
        async fn send_template(&self, payload: &TemplatePayload) -> Result<Value, SendError>;
    }
}
