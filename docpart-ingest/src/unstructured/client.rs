use anyhow::{Context as _, Result};
use itertools::Itertools;
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::config::UnstructuredConfig;

const API_KEY_HEADER: &str = "unstructured-api-key";

/// Thin HTTP client around the partition endpoint of the service.
#[derive(Clone, Debug, Default)]
pub struct UnstructuredClient {
    config: UnstructuredConfig,
    client: reqwest::Client,
}

/// A single element of the partition response.
///
/// The service returns a json array of these; elements without a `text` field
/// (page breaks, images) carry no body.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionElement {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub element_id: Option<String>,
    pub text: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// The partitioned content of a single uploaded file.
#[derive(Clone, Debug, Default)]
pub struct PartitionedText {
    pub elements: Vec<PartitionElement>,
}

impl PartitionedText {
    /// Joins the text of all elements that have one into a single body.
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|element| element.text.as_deref())
            .filter(|text| !text.is_empty())
            .join(" ")
    }
}

impl UnstructuredClient {
    pub fn new(config: UnstructuredConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &UnstructuredConfig {
        &self.config
    }

    /// Uploads `content` as a multipart form and returns the partitioned
    /// elements.
    ///
    /// The api key header is only sent when a key is configured. Note that
    /// this currently only supports a single file per request.
    ///
    /// # Errors
    /// Errors if the service cannot be reached, responds with a non-success
    /// status, or the response body is not a json array of elements.
    #[instrument(skip(self, content), fields(size = content.len()))]
    pub async fn partition(&self, file_name: &str, content: Vec<u8>) -> Result<PartitionedText> {
        let mut form = Form::new()
            .part("files", Part::bytes(content).file_name(file_name.to_string()))
            .text("strategy", self.config.strategy().to_string());

        for language in self.config.languages() {
            form = form.text("languages[]", language.clone());
        }

        let mut request = self
            .client
            .post(self.config.partition_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form);

        let api_key = self.config.api_key().expose_secret();
        if !api_key.is_empty() {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let elements: Vec<PartitionElement> = request
            .send()
            .await
            .context("Failed to reach the partitioning service")?
            .error_for_status()
            .context("Partitioning service returned an error")?
            .json()
            .await
            .context("Failed to decode the partition response")?;

        debug!(file_name, num_elements = elements.len(), "Partitioned file");

        Ok(PartitionedText { elements })
    }
}
