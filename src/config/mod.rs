pub mod types;

use anyhow::Result;
use std::path::Path;

pub use types::Config;

pub fn load_config(path: &str) -> Result<Config> {
    let content = std::fs::read_to_string(Path::new(path))?;
    let config: Config = serde_yml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_reads_yaml_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        std::fs::write(&config_path, "geo:\n  database: delegated-apnic-latest\n").unwrap();

        let config = load_config(config_path.to_str().unwrap()).unwrap();
        assert_eq!(config.geo.database, "delegated-apnic-latest");
        // 未写明的段落使用默认值
        assert_eq!(config.server.listen, "0.0.0.0");
        assert_eq!(config.server.port, 13000);
        assert!(!config.server.trust_proxy);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn load_config_reads_explicit_server_section() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        std::fs::write(
            &config_path,
            "server:\n  listen: \"127.0.0.1\"\n  port: 3000\n  trust_proxy: true\ngeo:\n  database: data/apnic.txt\n",
        )
        .unwrap();

        let config = load_config(config_path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.listen, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.trust_proxy);
    }

    #[test]
    fn load_config_rejects_missing_geo_section() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        std::fs::write(&config_path, "server:\n  port: 3000\n").unwrap();

        assert!(load_config(config_path.to_str().unwrap()).is_err());
    }

    #[test]
    fn validate_rejects_empty_database_path() {
        let config: Config = serde_yml::from_str("geo:\n  database: \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }
}
