//! 配置存储服务
//! 从 JSON 配置文件加载网关配置

use crate::core::models::GatewayConfig;
use anyhow::Context;
use std::path::Path;

/// 配置存储服务
pub struct ConfigStorage;

impl ConfigStorage {
    /// 加载网关配置,文件不存在时退回默认值
    pub fn load(path: &Path) -> anyhow::Result<GatewayConfig> {
        if !path.exists() {
            tracing::info!("config file {:?} not found, using defaults", path);
            return Ok(GatewayConfig::default());
        }

        let content =
            std::fs::read_to_string(path).with_context(|| format!("读取配置文件失败: {:?}", path))?;
        let config: GatewayConfig =
            serde_json::from_str(&content).with_context(|| format!("解析配置文件失败: {:?}", path))?;

        tracing::info!("loaded config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::AuthMode;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let config = ConfigStorage::load(Path::new("/nonexistent/gateway.json")).unwrap();
        assert_eq!(config.auth_type, AuthMode::Oidc);
        assert!(config.oscar_endpoint.is_empty());
        assert_eq!(config.request_timeout, 120);
    }

    #[test]
    fn test_load_parses_auth_aliases() {
        let dir = std::env::temp_dir().join("oscar-gateway-test-config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(
            &path,
            r#"{"oscar_endpoint": "https://cluster.example.com", "auth_type": "basicauth", "username": "user", "password": "pass"}"#,
        )
        .unwrap();

        let config = ConfigStorage::load(&path).unwrap();
        assert_eq!(config.auth_type, AuthMode::Basic);
        assert_eq!(config.username.as_deref(), Some("user"));
        std::fs::remove_file(&path).ok();
    }
}
