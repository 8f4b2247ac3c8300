use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub geo: GeoConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.server.listen.is_empty() {
            anyhow::bail!("server listen address must not be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("server port must be non-zero");
        }
        if self.geo.database.is_empty() {
            anyhow::bail!("geo database path must not be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 为 true 时信任 X-Forwarded-For / X-Real-IP 头
    #[serde(default)]
    pub trust_proxy: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            trust_proxy: false,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    13000
}

#[derive(Debug, Deserialize)]
pub struct GeoConfig {
    /// 注册局数据文件路径（APNIC delegated-stats 格式）
    pub database: String,
}
