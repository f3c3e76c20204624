use crate::core::error::GatewayError;
use crate::core::models::{AuthMode, GatewayConfig};
use crate::proxy::auth::{self, Credential};
use crate::proxy::upstream::{ForwardBody, ForwardResult};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// 解析调用方凭据
///
/// oidc 模式下,非服务令牌的入站头先做 bearer 形状校验,
/// 不合法的在任何上游调用之前就回 401;服务令牌头不受
/// 模式影响,直接进入决策。
pub fn resolve_caller(
    config: &GatewayConfig,
    headers: &HeaderMap,
) -> Result<Credential, GatewayError> {
    let inbound = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if config.auth_type == AuthMode::Oidc && inbound.is_some() && !auth::is_service_token(inbound)
    {
        let token = auth::validate_bearer(inbound)?;
        return Ok(auth::resolve(
            config.auth_type,
            Some(&token),
            config.username.as_deref(),
            config.password.as_deref(),
        ));
    }

    Ok(auth::resolve(
        config.auth_type,
        inbound,
        config.username.as_deref(),
        config.password.as_deref(),
    ))
}

/// 把上游结果转成给调用方的响应
///
/// 回显的 Raw 载荷先尝试按 JSON 解读,解不开的按字节原样回。
pub fn forward_reply(result: ForwardResult) -> Response {
    match result.body {
        ForwardBody::Json(value) => Json(value).into_response(),
        ForwardBody::Text(text) => text.into_response(),
        ForwardBody::Raw(bytes) => match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(value) => Json(value).into_response(),
            Err(_) => bytes.into_response(),
        },
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidAuth(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Http(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::UnexpectedStatus(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Transport(_) => StatusCode::BAD_GATEWAY,
        };

        match &self {
            GatewayError::Transport(detail) => {
                tracing::error!("upstream transport failure: {}", detail);
            }
            GatewayError::InvalidAuth(detail) => {
                tracing::warn!("rejected caller credentials: {}", detail);
            }
            other => {
                tracing::warn!("upstream call failed: {}", other);
            }
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub async fn request_logger(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = std::time::Instant::now();
    let response = next.run(req).await;
    let duration = start.elapsed();
    tracing::info!(
        "{} {} - status: {}, latency: {}ms",
        method,
        uri,
        response.status(),
        duration.as_millis()
    );
    response
}
