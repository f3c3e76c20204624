//! 服务同步调用流程
//! 先取服务令牌,换上令牌提交载荷,最后识别返回载荷的类型

use crate::core::error::{GatewayError, GatewayResult};
use crate::core::models::{RunOutcome, ServiceDescriptor};
use crate::proxy::auth::Credential;
use crate::proxy::upstream::{ForwardBody, UpstreamClient};
use crate::proxy::{mime, paths};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;

/// 同步调用一个 OSCAR 服务
///
/// 用调用方凭据取服务描述,换成服务专属令牌后把 base64
/// 载荷提交给 run 端点。令牌只存活在本次调用的栈上,
/// 每次调用都重新获取。取描述失败时绝不发起调用。
pub async fn run_service(
    upstream: &UpstreamClient,
    name: &str,
    caller: &Credential,
    payload: Bytes,
) -> GatewayResult<RunOutcome> {
    let service_path = format!("{}{}", paths::SERVICES, name);
    let fetched = upstream.get(&service_path, caller, false).await?;
    let descriptor: ServiceDescriptor = match fetched.body {
        ForwardBody::Json(value) => serde_json::from_value(value).map_err(|e| {
            GatewayError::Transport(format!("unreadable service descriptor: {}", e))
        })?,
        _ => {
            return Err(GatewayError::Transport(
                "unreadable service descriptor".to_string(),
            ))
        }
    };

    let secret = match descriptor.token {
        Some(token) if !token.is_empty() => token,
        _ => {
            tracing::warn!("service {} has no invocation token", name);
            return Err(GatewayError::NotFound(format!(
                "service {} has no token",
                name
            )));
        }
    };

    let run_path = format!("{}{}", paths::RUN, name);
    let invoked = upstream
        .post(&run_path, &Credential::ServiceToken(secret), payload, true)
        .await?;

    let bytes = match invoked.body {
        ForwardBody::Raw(bytes) => bytes,
        ForwardBody::Text(text) => Bytes::from(text),
        ForwardBody::Json(value) => Bytes::from(value.to_string()),
    };
    Ok(interpret_payload(invoked.content_type.as_deref(), &bytes))
}

/// 识别调用返回的载荷
///
/// 上游声明 JSON 的直接采信;否则把文本按严格 base64 解码,
/// 解码成功时对解码后的字节验魔数,data 保持收到的文本不变;
/// 解不开的按原始字节验魔数,非 UTF-8 内容转成 base64 文本。
fn interpret_payload(content_type: Option<&str>, bytes: &[u8]) -> RunOutcome {
    if content_type.map_or(false, |value| value.starts_with("application/json")) {
        return RunOutcome {
            mime: "application/json".to_string(),
            data: String::from_utf8_lossy(bytes).into_owned(),
        };
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => {
            let trimmed = text.trim();
            match STANDARD.decode(trimmed) {
                Ok(decoded) => RunOutcome {
                    mime: mime::classify_signature(&decoded).to_string(),
                    data: trimmed.to_string(),
                },
                Err(_) => RunOutcome {
                    mime: mime::classify_signature(bytes).to_string(),
                    data: text.to_string(),
                },
            }
        }
        Err(_) => RunOutcome {
            mime: mime::classify_signature(bytes).to_string(),
            data: STANDARD.encode(bytes),
        },
    }
}
