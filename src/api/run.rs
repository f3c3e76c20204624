//! 服务同步调用端点

use super::common::resolve_caller;
use crate::core::error::GatewayError;
use crate::proxy::run;
use crate::state::AppState;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;

/// POST /run/:name - 上传文件并同步调用服务
///
/// multipart 里取 `file` 字段,内容转成 base64 后作为调用
/// 载荷提交;回 `{mime, data}`。
pub async fn run_service(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, GatewayError> {
    let caller = resolve_caller(&state.config, &headers)?;

    let file = match read_upload(multipart).await {
        Ok(bytes) => bytes,
        Err(message) => {
            return Ok(
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            )
        }
    };

    let payload = Bytes::from(STANDARD.encode(&file));
    let outcome = run::run_service(&state.upstream, &name, &caller, payload).await?;
    Ok(Json(outcome).into_response())
}

/// 从 multipart 里取出 `file` 字段的内容
async fn read_upload(mut multipart: Multipart) -> Result<Bytes, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("broken multipart upload: {}", e))?
    {
        if field.name() == Some("file") {
            return field
                .bytes()
                .await
                .map_err(|e| format!("failed to read uploaded file: {}", e));
        }
    }
    Err("no file was uploaded".to_string())
}
