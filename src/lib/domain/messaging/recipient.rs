//! Message recipient entity.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header type used for a recipient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    /// Listed in the To header.
    #[default]
    To,
    /// Carbon-copied.
    Cc,
    /// Blind carbon-copied.
    Bcc,
}

impl RecipientType {
    /// Parse a wire string into a recipient type.
    ///
    /// Unrecognized values fall back to [`RecipientType::To`]. This is a
    /// deliberate default, not an error.
    pub fn parse(value: &str) -> Self {
        match value {
            "to" => RecipientType::To,
            "cc" => RecipientType::Cc,
            "bcc" => RecipientType::Bcc,
            _ => RecipientType::To,
        }
    }
}

impl fmt::Display for RecipientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipientType::To => write!(f, "to"),
            RecipientType::Cc => write!(f, "cc"),
            RecipientType::Bcc => write!(f, "bcc"),
        }
    }
}

/// Message recipient entity.
///
/// The email address is the recipient's identity within a [`Message`]:
/// adding a second recipient with the same address replaces the first.
///
/// [`Message`]: crate::domain::messaging::Message
#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    email: String,
    name: Option<String>,
    kind: RecipientType,
    merge_vars: IndexMap<String, Value>,
    metadata: IndexMap<String, String>,
}

impl Recipient {
    /// Create a new recipient.
    pub fn new(email: impl Into<String>, name: Option<String>, kind: RecipientType) -> Self {
        Self {
            email: email.into(),
            name,
            kind,
            merge_vars: IndexMap::new(),
            metadata: IndexMap::new(),
        }
    }

    /// Get the recipient's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Get the recipient's display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the recipient's header type.
    pub fn kind(&self) -> RecipientType {
        self.kind
    }

    /// Replace the recipient's merge variables with key/value entries.
    ///
    /// Per-recipient merge variables override global ones with the same name.
    pub fn set_merge_vars(&mut self, merge_vars: IndexMap<String, Value>) -> &mut Self {
        self.merge_vars = merge_vars;
        self
    }

    /// Get the recipient's merge variables.
    pub fn merge_vars(&self) -> &IndexMap<String, Value> {
        &self.merge_vars
    }

    /// Add a single merge variable. Names may not start with `_`.
    pub fn add_merge_var(
        &mut self,
        name: impl Into<String>,
        content: impl Into<Value>,
    ) -> &mut Self {
        self.merge_vars.insert(name.into(), content.into());
        self
    }

    /// Remove a single merge variable.
    pub fn remove_merge_var(&mut self, name: &str) -> &mut Self {
        self.merge_vars.shift_remove(name);
        self
    }

    /// Replace the recipient's metadata with key/value entries.
    ///
    /// Per-recipient metadata overrides the message-level values.
    pub fn set_metadata(&mut self, metadata: IndexMap<String, String>) -> &mut Self {
        self.metadata = metadata;
        self
    }

    /// Get the recipient's metadata.
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

    /// Produce the recipient's wire form for the `to` list.
    ///
    /// Merge variables and metadata are not part of this record; the owning
    /// message hoists them into the `merge_vars` and `recipient_metadata`
    /// top-level structures.
    pub fn to_payload(&self) -> RecipientPayload {
        RecipientPayload {
            email: self.email.clone(),
            name: self.name.clone(),
            kind: self.kind,
        }
    }
}

/// Wire form of a recipient within the `to` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientPayload {
    /// Recipient address.
    pub email: String,

    /// Display name, `null` on the wire when unset.
    pub name: Option<String>,

    /// Header type.
    #[serde(rename = "type")]
    pub kind: RecipientType,
}
