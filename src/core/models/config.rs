//! 网关配置模型

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 上游认证模式,启动时固定,运行期间不再变化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum AuthMode {
    /// HTTP Basic,使用配置的用户名/密码
    #[serde(rename = "basicauth", alias = "basic")]
    #[value(name = "basicauth", alias = "basic")]
    Basic,
    /// OIDC,透传调用方的 bearer 令牌
    #[serde(rename = "oidc")]
    #[value(name = "oidc")]
    Oidc,
}

/// 网关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// OSCAR 集群入口,例如 https://cluster.example.com
    pub oscar_endpoint: String,

    /// 上游认证模式
    pub auth_type: AuthMode,

    /// basicauth 模式的用户名
    pub username: Option<String>,

    /// basicauth 模式的密码
    pub password: Option<String>,

    /// 上游请求超时时间(秒)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self {
            oscar_endpoint: String::new(),
            auth_type: AuthMode::Oidc,
            username: None,
            password: None,
            request_timeout: default_request_timeout(),
        }
    }

    /// 启动前校验,不满足的配置直接拒绝启动
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.oscar_endpoint.is_empty() {
            anyhow::bail!("oscar_endpoint is required (flag --oscar-endpoint or env OSCAR_ENDPOINT)");
        }
        url::Url::parse(&self.oscar_endpoint)
            .with_context(|| format!("invalid oscar_endpoint: {}", self.oscar_endpoint))?;
        if self.auth_type == AuthMode::Basic && (self.username.is_none() || self.password.is_none()) {
            anyhow::bail!("basicauth mode requires username and password");
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_request_timeout() -> u64 {
    120 // 默认 120 秒
}
