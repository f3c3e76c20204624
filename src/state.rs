use crate::core::models::GatewayConfig;
use crate::proxy::upstream::UpstreamClient;

/// 网关共享状态
///
/// 启动后只读;上游客户端内部自带连接池,跨请求共享。
pub struct AppState {
    pub config: GatewayConfig,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(&config.oscar_endpoint, config.request_timeout)?;
        Ok(Self { config, upstream })
    }
}
