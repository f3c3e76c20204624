//! 集群信息端点

use super::common::{forward_reply, resolve_caller};
use crate::core::error::GatewayError;
use crate::proxy::paths;
use crate::state::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use std::sync::Arc;

/// GET /info - 集群信息
pub async fn get_info(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let result = state.upstream.get(paths::INFO, &caller, false).await?;
    Ok(forward_reply(result))
}

/// GET /config - 集群配置
pub async fn get_config(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let result = state.upstream.get(paths::CONFIG, &caller, false).await?;
    Ok(forward_reply(result))
}

/// GET /health - 透传集群健康探针,原样回文本
pub async fn get_health(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let result = state.upstream.get(paths::HEALTH, &caller, true).await?;
    Ok(forward_reply(result))
}
