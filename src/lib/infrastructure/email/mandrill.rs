//! Mandrill API client implementation of the sender seam.

use anyhow::anyhow;
use async_trait::async_trait;
use clap::Parser;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::domain::messaging::{SendError, TemplatePayload, TemplateSender};

/// Mandrill API configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct MandrillConfig {
    /// The API key, sent in the body of every request
    #[clap(long, env = "MANDRILL_API_KEY")]
    pub api_key: String,

    /// Base URL of the Mandrill API
    #[clap(
        long,
        env = "MANDRILL_BASE_URL",
        default_value = "https://mandrillapp.com/api/1.0"
    )]
    pub base_url: String,
}

/// Mandrill template-send client
#[derive(Debug, Default, Clone)]
pub struct MandrillClient {
    config: MandrillConfig,
    client: Client,
}

impl MandrillClient {
    /// Create a new Mandrill client
    pub fn new(config: MandrillConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

// Mandrill takes the API key in the request body, next to the payload
// fields rather than in a header.
#[derive(Debug, Serialize)]
struct SendTemplateRequest<'a> {
    key: &'a str,
    #[serde(flatten)]
    payload: &'a TemplatePayload,
}

#[async_trait]
impl TemplateSender for MandrillClient {
    async fn send_template(&self, payload: &TemplatePayload) -> Result<Value, SendError> {
        debug!("sending template '{}' via Mandrill", payload.template_name);

        let request = SendTemplateRequest {
            key: &self.config.api_key,
            payload,
        };

        let response = self
            .client
            .post(self.api_url("/messages/send-template.json"))
            .json(&request)
            .send()
            .await
            .map_err(|e| SendError::UnknownError(anyhow!("failed to reach Mandrill: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Mandrill rejected template send ({}): {}", status, body);
            return Err(SendError::Provider { status, body });
        }

        let body: Value = response.json().await.map_err(|e| {
            SendError::UnknownError(anyhow!("failed to parse Mandrill response: {}", e))
        })?;

        debug!("template '{}' accepted by Mandrill", payload.template_name);

        Ok(body)
    }
}
