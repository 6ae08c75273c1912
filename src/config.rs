use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a JSON array export is turned into records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonStrategy {
    /// Extract and decode one object at a time from a byte buffer.
    #[default]
    Framed,
    /// Decode the whole array in a single pass, sending each element into
    /// the channel as the deserializer visits it.
    Bulk,
}

/// Settings for a single import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Records that may be decoded ahead of the consumer.
    pub channel_capacity: usize,
    pub read_buffer_size: usize,
    /// Reject JSON objects carrying fields the record type does not model.
    pub strict_fields: bool,
    pub json_strategy: JsonStrategy,
    /// Upper bound on each read from the source.
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 100,
            read_buffer_size: 8 * 1024,
            strict_fields: false,
            json_strategy: JsonStrategy::Framed,
            timeout: None,
        }
    }
}

/// Settings for the HTTP connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Replaces the default host for queries that do not set their own.
    pub host: Option<String>,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: None,
            timeout: Duration::from_secs(30),
            user_agent: concat!("dawa_dataflow/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DawaConfig {
    pub client: ClientConfig,
    pub import: ImportConfig,
}

/// Reads a [`DawaConfig`] from a file. The format is picked from the
/// extension.
#[cfg(feature = "configs")]
pub fn load_config(path: &str) -> Result<DawaConfig, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path))
        .build()?;

    settings.try_deserialize()
}
