use derive_builder::Builder;
use secrecy::SecretString;
use serde::Deserialize;

const DEFAULT_SERVER_URL: &str = "http://172.17.0.1:8000";
const PARTITION_PATH: &str = "/general/v0/general";

const DEFAULT_STRATEGY: &str = "auto";
const DEFAULT_LANGUAGES: [&str; 2] = ["eng", "de"];

/// Configuration for the partitioning service endpoint.
///
/// `Default` reads `UNSTRUCTURED_API_URL` and `UNSTRUCTURED_API_KEY` from the
/// environment. The server url is the bare address of the service, without
/// the `/general/v0/general` suffix.
#[derive(Clone, Debug, Deserialize, Builder)]
#[serde(default)]
#[builder(setter(into), default, build_fn(error = "anyhow::Error"))]
pub struct UnstructuredConfig {
    server_url: String,
    api_key: SecretString,
    strategy: String,
    languages: Vec<String>,
}

impl Default for UnstructuredConfig {
    fn default() -> Self {
        Self {
            server_url: std::env::var("UNSTRUCTURED_API_URL")
                .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string()),
            api_key: get_api_key().into(),
            strategy: DEFAULT_STRATEGY.to_string(),
            languages: DEFAULT_LANGUAGES.map(String::from).to_vec(),
        }
    }
}

fn get_api_key() -> String {
    std::env::var("UNSTRUCTURED_API_KEY").unwrap_or_default()
}

impl UnstructuredConfig {
    pub fn builder() -> UnstructuredConfigBuilder {
        UnstructuredConfigBuilder::default()
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// The full url the partition request is posted to.
    pub fn partition_url(&self) -> String {
        format!("{}{PARTITION_PATH}", self.server_url.trim_end_matches('/'))
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }
}
