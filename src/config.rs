//! Console configuration
//!
//! Defaults, then environment (`.env` honoured), then CLI flags.

use std::path::PathBuf;

use url::Url;

use crate::error::{ConsoleError, Result};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_NICHE: &str = "Marketing Agencies in Austin";
pub const DEFAULT_COUNT: u32 = 1;

/// Operator-facing bounds for the lead count
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 10;

const MISSION_PATH: &str = "/ws";
const HISTORY_PATH: &str = "/api/history";

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub server_url: String,
    pub niche: String,
    pub count: u32,
    pub clear_log_on_launch: bool,
    pub log_file: PathBuf,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            niche: DEFAULT_NICHE.to_string(),
            count: DEFAULT_COUNT,
            clear_log_on_launch: false,
            log_file: default_log_file(),
        }
    }
}

impl ConsoleConfig {
    /// Defaults overridden by `SDR_*` environment variables
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("SDR_SERVER_URL") {
            config.set_server_url(&url)?;
        }
        if let Some(niche) = lookup("SDR_NICHE") {
            config.niche = niche;
        }
        if let Some(count) = lookup("SDR_COUNT").and_then(|c| c.trim().parse().ok()) {
            config.count = clamp_count(count);
        }
        if let Some(path) = lookup("SDR_LOG_FILE") {
            config.log_file = PathBuf::from(path);
        }
        Ok(config)
    }

    /// Validate and store the backend base URL
    pub fn set_server_url(&mut self, url: &str) -> Result<()> {
        Url::parse(url)?;
        self.server_url = url.to_string();
        Ok(())
    }

    pub fn server(&self) -> Result<Url> {
        Ok(Url::parse(&self.server_url)?)
    }

    /// WebSocket endpoint of the mission channel (http→ws, https→wss)
    pub fn mission_url(&self) -> Result<Url> {
        let server = self.server()?;
        let scheme = match server.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => {
                return Err(ConsoleError::UnsupportedScheme {
                    scheme: other.to_string(),
                })
            }
        };
        let mut url = server.join(MISSION_PATH)?;
        url.set_scheme(scheme)
            .map_err(|_| ConsoleError::UnsupportedScheme {
                scheme: scheme.to_string(),
            })?;
        Ok(url)
    }

    pub fn history_url(&self) -> Result<Url> {
        Ok(self.server()?.join(HISTORY_PATH)?)
    }
}

pub fn clamp_count(count: u32) -> u32 {
    count.clamp(MIN_COUNT, MAX_COUNT)
}

fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("sdr-console")
        .join("console.log")
}
