//! Minimal schema registry client.
//!
//! Registers the value schema of a message type under the topic name
//! strategy and returns the id the encoder frames records with.

use crate::error::{PublishError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use text_messages::KafkaMessage;
use tracing::{debug, info};

const CONTENT_TYPE: &str = "application/vnd.schemaregistry.v1+json";

#[derive(Debug, Serialize)]
struct RegisterSchemaRequest<'a> {
    schema: &'a str,
}

#[derive(Debug, Deserialize)]
struct RegisterSchemaResponse {
    id: u32,
}

/// HTTP client for the subjects API of a Confluent-compatible registry.
pub struct SchemaRegistryClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl SchemaRegistryClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PublishError::SchemaRegistry(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn versions_url(&self, subject: &str) -> String {
        format!("{}/subjects/{}/versions", self.base_url, subject)
    }

    /// Registers `schema` under `subject`.
    ///
    /// Registering an identical schema again returns the existing id.
    pub async fn register(&self, subject: &str, schema: &str) -> Result<u32> {
        let url = self.versions_url(subject);
        debug!("Registering schema for subject '{}' at {}", subject, url);

        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .json(&RegisterSchemaRequest { schema })
            .send()
            .await
            .map_err(|e| {
                PublishError::SchemaRegistry(format!("Failed to register schema: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::SchemaRegistry(format!(
                "Schema registration for '{}' failed with status {}: {}",
                subject, status, body
            )));
        }

        let registered: RegisterSchemaResponse = response.json().await.map_err(|e| {
            PublishError::SchemaRegistry(format!("Failed to parse registration response: {}", e))
        })?;

        info!(
            "Schema for subject '{}' registered with id {}",
            subject, registered.id
        );
        Ok(registered.id)
    }

    /// Registers the value schema of `M` under `<topic>-value`.
    pub async fn register_value_schema<M: KafkaMessage>(&self) -> Result<u32> {
        self.register(&M::value_subject(), M::SCHEMA).await
    }
}
