//! Message entity for sending.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::domain::messaging::{
    attachment::{Attachment, AttachmentPayload},
    errors::InvalidMimeTypeError,
    recipient::{Recipient, RecipientPayload},
    wire::{self, NameContent},
};

/// Merge language sent with every payload. A fixed wire-protocol constant,
/// not configurable.
pub const MERGE_LANGUAGE: &str = "handlebars";

/// Aggregate root for a single send: recipients, headers, merge variables,
/// tags, metadata, attachments and embedded images.
///
/// All mutators chain on `&mut self`. Recipients are keyed by email
/// address: adding a recipient with an address that is already present
/// replaces the earlier entry, and the serialized `to` list follows the
/// map's iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    subject: Option<String>,
    from_email: Option<String>,
    from_name: Option<String>,
    recipients: IndexMap<String, Recipient>,
    headers: IndexMap<String, String>,
    preserve_recipients: bool,
    merge_vars: IndexMap<String, Value>,
    tags: Vec<String>,
    metadata: IndexMap<String, String>,
    attachments: Vec<Attachment>,
    images: Vec<Attachment>,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject = Some(subject.into());
        self
    }

    /// Get the message subject.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Set the sender email address.
    pub fn set_from_email(&mut self, from_email: impl Into<String>) -> &mut Self {
        self.from_email = Some(from_email.into());
        self
    }

    /// Get the sender email address.
    pub fn from_email(&self) -> Option<&str> {
        self.from_email.as_deref()
    }

    /// Set the sender display name.
    pub fn set_from_name(&mut self, from_name: impl Into<String>) -> &mut Self {
        self.from_name = Some(from_name.into());
        self
    }

    /// Get the sender display name.
    pub fn from_name(&self) -> Option<&str> {
        self.from_name.as_deref()
    }

    /// Get the message recipients, keyed by email address.
    pub fn recipients(&self) -> &IndexMap<String, Recipient> {
        &self.recipients
    }

    /// Add a recipient.
    ///
    /// The recipient's email address is its identity: an existing entry
    /// with the same address is replaced.
    pub fn add_recipient(&mut self, recipient: Recipient) -> &mut Self {
        self.recipients
            .insert(recipient.email().to_string(), recipient);
        self
    }

    /// Remove a recipient by email address.
    pub fn remove_recipient(&mut self, email: &str) -> &mut Self {
        self.recipients.shift_remove(email);
        self
    }

    /// Clear the list of recipients.
    pub fn clear_recipients(&mut self) -> &mut Self {
        self.recipients.clear();
        self
    }

    /// Set the message headers using key/value entries.
    pub fn set_headers(&mut self, headers: IndexMap<String, String>) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Get the message headers.
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// Add a single header.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Remove a single header.
    pub fn remove_header(&mut self, key: &str) -> &mut Self {
        self.headers.shift_remove(key);
        self
    }

    /// Set whether all recipients are exposed in the To header of each email.
    pub fn set_preserve_recipients(&mut self, preserve_recipients: bool) -> &mut Self {
        self.preserve_recipients = preserve_recipients;
        self
    }

    /// Get whether all recipients are exposed in the To header of each email.
    pub fn preserve_recipients(&self) -> bool {
        self.preserve_recipients
    }

    /// Set the global merge variables using key/value entries.
    ///
    /// Global merge variables apply to all recipients and can be overridden
    /// per recipient.
    pub fn set_merge_vars(&mut self, merge_vars: IndexMap<String, Value>) -> &mut Self {
        self.merge_vars = merge_vars;
        self
    }

    /// Get the global merge variables.
    pub fn merge_vars(&self) -> &IndexMap<String, Value> {
        &self.merge_vars
    }

    /// Add a single global merge variable. Names may not start with `_`.
    pub fn add_merge_var(
        &mut self,
        name: impl Into<String>,
        content: impl Into<Value>,
    ) -> &mut Self {
        self.merge_vars.insert(name.into(), content.into());
        self
    }

    /// Remove a single global merge variable.
    pub fn remove_merge_var(&mut self, name: &str) -> &mut Self {
        self.merge_vars.shift_remove(name);
        self
    }

    /// Set the message tags.
    pub fn set_tags(&mut self, tags: Vec<String>) -> &mut Self {
        self.tags = tags;
        self
    }

    /// Get the message tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Add a single tag.
    ///
    /// Tags starting with an underscore are reserved by the provider and
    /// will cause errors on send; the caller is responsible for avoiding
    /// them.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the message metadata using key/value entries.
    pub fn set_metadata(&mut self, metadata: IndexMap<String, String>) -> &mut Self {
        self.metadata = metadata;
        self
    }

    /// Get the message metadata.
    pub fn metadata(&self) -> &IndexMap<String, String> {
        &self.metadata
    }

    /// Add a single metadata entry.
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Remove a single metadata entry.
    pub fn remove_metadata(&mut self, key: &str) -> &mut Self {
        self.metadata.shift_remove(key);
        self
    }

    /// Get the message attachments.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Add an attachment.
    pub fn add_attachment(&mut self, attachment: Attachment) -> &mut Self {
        self.attachments.push(attachment);
        self
    }

    /// Clear the message attachments.
    pub fn clear_attachments(&mut self) -> &mut Self {
        self.attachments.clear();
        self
    }

    /// Get the embedded images.
    pub fn images(&self) -> &[Attachment] {
        &self.images
    }

    /// Add an embedded image.
    ///
    /// # Errors
    /// [`InvalidMimeTypeError`] if the attachment's MIME type does not
    /// start with `image/`; the message is left unmodified.
    pub fn add_image(&mut self, image: Attachment) -> Result<&mut Self, InvalidMimeTypeError> {
        if !image.mime_type().starts_with("image/") {
            return Err(InvalidMimeTypeError {
                mime_type: image.mime_type().to_string(),
            });
        }

        self.images.push(image);
        Ok(self)
    }

    /// Clear the embedded images.
    pub fn clear_images(&mut self) -> &mut Self {
        self.images.clear();
        self
    }

    /// Produce the full wire form of the message.
    ///
    /// Pure: repeated calls on an unmodified message yield identical
    /// payloads. Per-recipient merge variables and metadata are hoisted out
    /// of the recipients into the `merge_vars` and `recipient_metadata`
    /// lists; recipients whose maps are empty contribute no entry there.
    pub fn to_payload(&self) -> MessagePayload {
        let mut to = Vec::with_capacity(self.recipients.len());
        let mut merge_vars = Vec::new();
        let mut recipient_metadata = Vec::new();

        for (email, recipient) in &self.recipients {
            to.push(recipient.to_payload());

            if !recipient.merge_vars().is_empty() {
                merge_vars.push(RecipientMergeVars {
                    rcpt: email.clone(),
                    vars: wire::to_name_content(recipient.merge_vars()),
                });
            }

            if !recipient.metadata().is_empty() {
                recipient_metadata.push(RecipientMetadata {
                    rcpt: email.clone(),
                    values: recipient.metadata().clone(),
                });
            }
        }

        MessagePayload {
            subject: self.subject.clone(),
            from_email: self.from_email.clone(),
            from_name: self.from_name.clone(),
            to,
            headers: self.headers.clone(),
            preserve_recipients: self.preserve_recipients,
            merge: true,
            merge_language: MERGE_LANGUAGE,
            global_merge_vars: wire::to_name_content(&self.merge_vars),
            merge_vars,
            tags: self.tags.clone(),
            metadata: self.metadata.clone(),
            recipient_metadata,
            attachments: self.attachments.iter().map(Attachment::to_payload).collect(),
            images: self.images.iter().map(Attachment::to_payload).collect(),
        }
    }
}

/// Full wire form of a message, as expected by the template-send endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePayload {
    /// Message subject.
    pub subject: Option<String>,

    /// Sender email address.
    pub from_email: Option<String>,

    /// Sender display name.
    pub from_name: Option<String>,

    /// All recipients, in the recipient map's iteration order.
    pub to: Vec<RecipientPayload>,

    /// Extra headers.
    pub headers: IndexMap<String, String>,

    /// Whether all recipients are exposed in each email's To header.
    pub preserve_recipients: bool,

    /// Always `true`; fixed wire-protocol constant.
    pub merge: bool,

    /// Always [`MERGE_LANGUAGE`]; fixed wire-protocol constant.
    pub merge_language: &'static str,

    /// Global merge variables in name-content form.
    pub global_merge_vars: Vec<NameContent>,

    /// Per-recipient merge variable overrides, one entry per recipient with
    /// a non-empty merge variable map.
    pub merge_vars: Vec<RecipientMergeVars>,

    /// Message tags.
    pub tags: Vec<String>,

    /// Message metadata.
    pub metadata: IndexMap<String, String>,

    /// Per-recipient metadata overrides, one entry per recipient with a
    /// non-empty metadata map.
    pub recipient_metadata: Vec<RecipientMetadata>,

    /// Attachments, in insertion order.
    pub attachments: Vec<AttachmentPayload>,

    /// Embedded images, in insertion order.
    pub images: Vec<AttachmentPayload>,
}

/// Merge variable overrides for one recipient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipientMergeVars {
    /// The recipient's email address.
    pub rcpt: String,

    /// The recipient's merge variables in name-content form.
    pub vars: Vec<NameContent>,
}

/// Metadata overrides for one recipient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipientMetadata {
    /// The recipient's email address.
    pub rcpt: String,

    /// The recipient's metadata as a plain map, not name-content records.
    pub values: IndexMap<String, String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::messaging::recipient::RecipientType;

    use super::*;

    #[test]
    fn test_add_recipient_with_same_email_replaces_earlier_entry() {
        let mut message = Message::new();

        message.add_recipient(Recipient::new(
            "user@example.com",
            Some("First".to_string()),
            RecipientType::To,
        ));

        let mut replacement = Recipient::new(
            "user@example.com",
            Some("Second".to_string()),
            RecipientType::Bcc,
        );
        replacement.add_merge_var("x", 1);
        message.add_recipient(replacement);

        let payload = message.to_payload();

        assert_eq!(payload.to.len(), 1);
        assert_eq!(payload.to[0].email, "user@example.com");
        assert_eq!(payload.to[0].name.as_deref(), Some("Second"));
        assert_eq!(payload.to[0].kind, RecipientType::Bcc);
        assert_eq!(payload.merge_vars.len(), 1);
        assert_eq!(payload.merge_vars[0].vars[0].name, "x");
    }

    #[test]
    fn test_remove_and_clear_recipients() {
        let mut message = Message::new();
        message
            .add_recipient(Recipient::new("a@example.com", None, RecipientType::To))
            .add_recipient(Recipient::new("b@example.com", None, RecipientType::To))
            .remove_recipient("a@example.com");

        assert_eq!(message.recipients().len(), 1);

        message.clear_recipients();

        assert!(message.recipients().is_empty());
    }

    #[test]
    fn test_add_image_rejects_non_image_mime_type() {
        let mut message = Message::new();

        let result = message.add_image(Attachment::new("application/pdf", "doc.pdf", "JVBERi0="));

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().mime_type, "application/pdf");
        assert!(message.images().is_empty());
    }

    #[test]
    fn test_add_image_accepts_image_mime_type() {
        let mut message = Message::new();

        message
            .add_image(Attachment::new("image/png", "logo.png", "iVBORw0="))
            .expect("image/png must be accepted");

        assert_eq!(message.images().len(), 1);
    }

    #[test]
    fn test_merge_var_fan_out_skips_recipients_without_vars() {
        let mut message = Message::new();
        message.add_merge_var("a", 1).add_merge_var("b", 2);

        let mut r1 = Recipient::new("r1@x.com", None, RecipientType::To);
        r1.add_merge_var("x", 9);
        let r2 = Recipient::new("r2@x.com", None, RecipientType::To);

        message.add_recipient(r1).add_recipient(r2);

        let payload = serde_json::to_value(message.to_payload()).unwrap();

        assert_eq!(
            payload["global_merge_vars"],
            json!([
                {"name": "a", "content": 1},
                {"name": "b", "content": 2},
            ])
        );
        assert_eq!(
            payload["merge_vars"],
            json!([
                {"rcpt": "r1@x.com", "vars": [{"name": "x", "content": 9}]},
            ])
        );
    }

    #[test]
    fn test_recipient_metadata_fan_out_uses_raw_map() {
        let mut message = Message::new();

        let mut r1 = Recipient::new("r1@x.com", None, RecipientType::To);
        r1.add_metadata("user_id", "42");
        let r2 = Recipient::new("r2@x.com", None, RecipientType::To);

        message.add_recipient(r1).add_recipient(r2);

        let payload = serde_json::to_value(message.to_payload()).unwrap();

        assert_eq!(
            payload["recipient_metadata"],
            json!([
                {"rcpt": "r1@x.com", "values": {"user_id": "42"}},
            ])
        );
    }

    #[test]
    fn test_payload_carries_fixed_merge_constants() {
        let payload = serde_json::to_value(Message::new().to_payload()).unwrap();

        assert_eq!(payload["merge"], json!(true));
        assert_eq!(payload["merge_language"], json!("handlebars"));
    }

    #[test]
    fn test_payload_field_names_match_wire_contract() {
        let mut message = Message::new();
        message
            .set_subject("Welcome")
            .set_from_email("noreply@example.com")
            .set_from_name("Example")
            .add_header("Reply-To", "support@example.com")
            .add_tag("onboarding")
            .add_metadata("website", "example.com");

        let payload = serde_json::to_value(message.to_payload()).unwrap();

        for field in [
            "subject",
            "from_email",
            "from_name",
            "to",
            "headers",
            "preserve_recipients",
            "merge",
            "merge_language",
            "global_merge_vars",
            "merge_vars",
            "tags",
            "metadata",
            "recipient_metadata",
            "attachments",
            "images",
        ] {
            assert!(payload.get(field).is_some(), "missing field: {field}");
        }

        assert_eq!(payload["subject"], json!("Welcome"));
        assert_eq!(payload["headers"], json!({"Reply-To": "support@example.com"}));
        assert_eq!(payload["tags"], json!(["onboarding"]));
        assert_eq!(payload["preserve_recipients"], json!(false));
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let mut message = Message::new();
        message
            .set_subject("Welcome")
            .add_merge_var("plan", "pro")
            .add_recipient(Recipient::new(
                "user@example.com",
                Some("Ada".to_string()),
                RecipientType::To,
            ))
            .add_attachment(Attachment::new("text/plain", "a.txt", "aGk="));

        assert_eq!(message.to_payload(), message.to_payload());
    }

    #[test]
    fn test_tags_append_without_dedup() {
        let mut message = Message::new();
        message.add_tag("welcome").add_tag("welcome");

        assert_eq!(message.tags(), ["welcome", "welcome"]);
    }

    #[test]
    fn test_clear_attachments_and_images() {
        let mut message = Message::new();
        message.add_attachment(Attachment::new("text/plain", "a.txt", "aGk="));
        message
            .add_image(Attachment::new("image/png", "logo.png", "iVBORw0="))
            .expect("image/png must be accepted");

        message.clear_attachments().clear_images();

        assert!(message.attachments().is_empty());
        assert!(message.images().is_empty());
    }
}
