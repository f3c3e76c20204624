//! 作业日志端点

use super::common::{forward_reply, resolve_caller};
use crate::core::error::GatewayError;
use crate::proxy::paths;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// GET /logs/:name - 列出服务的全部作业
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let path = format!("{}{}", paths::LOGS, name);
    let result = state.upstream.get(&path, &caller, false).await?;
    Ok(forward_reply(result))
}

/// GET /logs/:name/:job - 单个作业的日志,原样回文本
pub async fn get_job_log(
    State(state): State<Arc<AppState>>,
    Path((name, job)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let path = format!("{}{}/{}", paths::LOGS, name, job);
    let result = state.upstream.get(&path, &caller, true).await?;
    Ok(forward_reply(result))
}

/// DELETE /logs/:name - 清空服务的作业日志
pub async fn delete_jobs(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let path = format!("{}{}", paths::LOGS, name);
    state.upstream.delete(&path, &caller).await?;
    Ok(format!(
        "Logs in the service {} has been successfully removed",
        name
    )
    .into_response())
}

/// DELETE /logs/:name/:job - 删除单个作业的日志
pub async fn delete_job_log(
    State(state): State<Arc<AppState>>,
    Path((name, job)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;
    let path = format!("{}{}/{}", paths::LOGS, name, job);
    state.upstream.delete(&path, &caller).await?;
    Ok(format!(
        "Logs in the service {} with job name {} has been successfully removed",
        name, job
    )
    .into_response())
}
