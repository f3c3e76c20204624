//! 服务管理端点

use super::common::{forward_reply, resolve_caller};
use crate::core::error::GatewayError;
use crate::proxy::paths;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use std::sync::Arc;

/// GET /services - 列出集群内全部服务
pub async fn list_services(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let result = state.upstream.get(paths::SERVICES, &caller, false).await?;
    Ok(forward_reply(result))
}

/// GET /services/:name - 按名称查询服务
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let path = format!("{}{}", paths::SERVICES, name);
    let result = state.upstream.get(&path, &caller, false).await?;
    Ok(forward_reply(result))
}

/// POST /services - 创建服务,201 时回显提交的定义
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let body = Bytes::from(payload.to_string());
    let result = state
        .upstream
        .post(paths::SERVICES, &caller, body, false)
        .await?;
    Ok(forward_reply(result))
}

/// PUT /services - 更新服务定义
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let body = Bytes::from(payload.to_string());
    let result = state.upstream.put(paths::SERVICES, &caller, body).await?;
    Ok(forward_reply(result))
}

/// DELETE /services/:name - 删除服务
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let path = format!("{}{}", paths::SERVICES, name);
    state.upstream.delete(&path, &caller).await?;
    Ok(format!("Service {} has been successfully removed", name).into_response())
}
