use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, Result};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    /// 会话文件路径，未设置时会话只保存在内存中
    pub session_file: Option<PathBuf>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_file: None,
            email: None,
            password: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let poll_interval_secs = match env::var("FOOD_POLL_INTERVAL_SECS") {
            Ok(raw) => raw
                .trim_end_matches('s')
                .parse::<u64>()
                .map_err(|_| ClientError::Config(format!("invalid poll interval: {}", raw)))?,
            Err(_) => DEFAULT_POLL_INTERVAL_SECS,
        };
        if poll_interval_secs == 0 {
            return Err(ClientError::Config(
                "poll interval must be at least one second".to_string(),
            ));
        }

        Ok(Config {
            api_base_url: normalize_base_url(
                &env::var("FOOD_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
            ),
            poll_interval_secs,
            request_timeout_secs: env::var("FOOD_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            session_file: env::var("FOOD_SESSION_FILE").ok().map(PathBuf::from),
            email: env::var("FOOD_EMAIL").ok(),
            password: env::var("FOOD_PASSWORD").ok(),
        })
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Config {
            api_base_url: normalize_base_url(base_url),
            ..Config::default()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// 相对路径拼接要求基础地址以 '/' 结尾
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
