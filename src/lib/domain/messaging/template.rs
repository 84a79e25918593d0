//! Template entity for sending.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::messaging::wire::{self, NameContent};

/// Reference to a template stored in the Mandrill account, plus per-send
/// content overrides for its editable regions.
///
/// The name is the template's immutable slug and never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    content: IndexMap<String, String>,
}

impl Template {
    /// Create a new template reference from its immutable slug or name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: IndexMap::new(),
        }
    }

    /// Get the template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the content regions with key/value entries.
    pub fn set_content(&mut self, content: IndexMap<String, String>) -> &mut Self {
        self.content = content;
        self
    }

    /// Get the content regions.
    pub fn content(&self) -> &IndexMap<String, String> {
        &self.content
    }

    /// Inject a single piece of content into a single editable region.
    ///
    /// Setting the same region twice keeps the latest content.
    pub fn add_content(
        &mut self,
        region: impl Into<String>,
        content: impl Into<String>,
    ) -> &mut Self {
        self.content.insert(region.into(), content.into());
        self
    }

    /// Produce the template's wire form.
    pub fn to_payload(&self) -> TemplateData {
        let content: IndexMap<String, Value> = self
            .content
            .iter()
            .map(|(region, content)| (region.clone(), Value::String(content.clone())))
            .collect();

        TemplateData {
            name: self.name.clone(),
            content: wire::to_name_content(&content),
        }
    }
}

/// Wire form of a template reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateData {
    /// The template's immutable slug or name.
    pub name: String,

    /// Content regions in name-content form; empty when no regions were set.
    pub content: Vec<NameContent>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_template_serializes_to_empty_content_list() {
        let template = Template::new("welcome-email");

        let payload = template.to_payload();

        assert_eq!(payload.name, "welcome-email");
        assert_eq!(payload.content, vec![]);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"name": "welcome-email", "content": []})
        );
    }

    #[test]
    fn test_add_content_upserts_region() {
        let mut template = Template::new("welcome-email");

        template
            .add_content("header", "Hi there")
            .add_content("footer", "Bye")
            .add_content("header", "Hello again");

        let payload = template.to_payload();

        assert_eq!(payload.content.len(), 2);
        assert_eq!(payload.content[0].name, "header");
        assert_eq!(payload.content[0].content, json!("Hello again"));
        assert_eq!(payload.content[1].name, "footer");
    }

    #[test]
    fn test_set_content_replaces_regions() {
        let mut template = Template::new("welcome-email");
        template.add_content("header", "Hi");

        let mut regions = IndexMap::new();
        regions.insert("body".to_string(), "All new".to_string());
        template.set_content(regions);

        assert_eq!(template.content().len(), 1);
        assert_eq!(template.content()["body"], "All new");
    }
}
