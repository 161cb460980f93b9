use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::common::TimeFrame;
use crate::projection::entity::{DEFAULT_LOOKBACK_DAYS, LOOKBACK_RANGE};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub feed: FeedConfig,
    pub projection: ProjectionConfig,
    pub log: LogConfig,
    /// 附加别名：显示名称 -> 代码，启动时并入内置别名表
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub default_lookback_days: usize,
    pub default_time_frame: TimeFrame,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// EnvFilter 语法，`RUST_LOG` 存在时以其为准
    pub filter: String,
    /// 日志文件目录；为空时只输出到终端
    pub dir: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            default_lookback_days: DEFAULT_LOOKBACK_DAYS,
            default_time_frame: TimeFrame::Daily,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            dir: None,
        }
    }
}

impl AppConfig {
    /// # Summary
    /// 校验加载后的配置。
    ///
    /// # Logic
    /// 1. 默认回看天数必须落在允许区间内。
    /// 2. 抓取超时不能为 0。
    /// 3. 行情地址不能为空。
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lookback = self.projection.default_lookback_days;
        if !LOOKBACK_RANGE.contains(&lookback) {
            return Err(ConfigError::Invalid(format!(
                "projection.default_lookback_days = {} is outside {}..={}",
                lookback,
                LOOKBACK_RANGE.start(),
                LOOKBACK_RANGE.end()
            )));
        }
        if self.feed.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "feed.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.feed.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("feed.base_url is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.feed.timeout_secs, 10);
        assert_eq!(config.projection.default_lookback_days, 20);
        assert_eq!(config.projection.default_time_frame, TimeFrame::Daily);
        assert_eq!(config.log.filter, "info");
        assert!(config.log.dir.is_none());
        assert!(config.aliases.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.projection.default_lookback_days = 61;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.feed.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let json = r#"{"server":{"port":9000},"aliases":{"台積電ADR":"TSM"}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.aliases.get("台積電ADR").map(String::as_str), Some("TSM"));
    }
}
