use anyhow::anyhow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_SESSION_PATH: &str = ".chronos/session.json";
pub const CONFIG_FILE_NAME: &str = "chronos";
pub const ENV_PREFIX: &str = "CHRONOS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub time_zone: Tz,
    pub session_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    api_base_url: String,
    time_zone: String,
    session_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            time_zone: Tz::UTC,
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
        }
    }
}

impl ClientConfig {
    /// Defaults, then `chronos.toml` in the working directory if present,
    /// then `CHRONOS_*` variables (a `.env` file is read first).
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(Some(Path::new(CONFIG_FILE_NAME)))
    }

    pub fn load_from(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("time_zone", "UTC")?
            .set_default("session_path", DEFAULT_SESSION_PATH)?;
        if let Some(file) = file {
            builder = builder.add_source(config::File::from(file).required(false));
        }
        let raw: RawConfig = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        let time_zone: Tz = raw
            .time_zone
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid CHRONOS_TIME_ZONE value: {}", raw.time_zone))?;
        let api_base_url = raw.api_base_url.trim().to_string();
        if api_base_url.is_empty() {
            return Err(anyhow!("CHRONOS_API_BASE_URL must not be empty"));
        }

        Ok(ClientConfig {
            api_base_url,
            time_zone,
            session_path: raw.session_path,
        })
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
