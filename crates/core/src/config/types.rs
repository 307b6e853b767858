use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Extraction service endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Service origin (e.g., "http://127.0.0.1:5001")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path receiving the multipart upload
    #[serde(default = "default_process_path")]
    pub process_path: String,
    /// Path answering the liveness check
    #[serde(default = "default_status_path")]
    pub status_path: String,
    /// Request timeout in seconds. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            process_path: default_process_path(),
            status_path: default_status_path(),
            timeout_secs: None,
        }
    }
}

impl EndpointConfig {
    /// Full URL of the upload endpoint.
    pub fn process_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.process_path)
    }

    /// Full URL of the status endpoint.
    pub fn status_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.status_path)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_process_path() -> String {
    "/process".to_string()
}

fn default_status_path() -> String {
    "/status".to_string()
}

/// Simulated progress configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProgressConfig {
    /// Milliseconds between ticks.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Percentage points added per tick.
    #[serde(default = "default_step")]
    pub step: u8,
    /// Highest percentage reachable by ticks alone.
    #[serde(default = "default_cap")]
    pub cap: u8,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            step: default_step(),
            cap: default_cap(),
        }
    }
}

fn default_interval_ms() -> u64 {
    300
}

fn default_step() -> u8 {
    5
}

fn default_cap() -> u8 {
    95
}

/// Where the returned dataset is saved
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Suggested file name for the downloaded result
    #[serde(default = "default_filename")]
    pub filename: String,
    /// Directory the result is saved into
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            directory: default_directory(),
        }
    }
}

fn default_filename() -> String {
    "tds_data_output.csv".to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}
