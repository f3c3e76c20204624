//! 认证解析
//! 把入站 Authorization 头和网关配置换算成发往上游的凭据

use crate::core::error::{GatewayError, GatewayResult};
use crate::core::models::AuthMode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// 出站凭据
///
/// 逐请求派生,用完即弃,从不落盘。`ServiceToken` 只由
/// 入站服务令牌头或 run 流程的令牌替换产生。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// 不携带 Authorization 头
    None,
    /// 配置的用户名/密码对
    BasicPair { username: String, password: String },
    /// 透传的 OIDC bearer 令牌
    BearerToken(String),
    /// OSCAR 服务令牌
    ServiceToken(String),
}

impl Credential {
    /// 渲染出站 Authorization 头的值
    ///
    /// OSCAR 对服务令牌同样走 Bearer scheme,所以
    /// `ServiceToken` 和 `BearerToken` 渲染形式一致。
    pub fn authorization_value(&self) -> Option<String> {
        match self {
            Credential::None => None,
            Credential::BasicPair { username, password } => {
                let pair = format!("{}:{}", username, password);
                Some(format!("Basic {}", STANDARD.encode(pair)))
            }
            Credential::BearerToken(token) => Some(format!("Bearer {}", token)),
            Credential::ServiceToken(secret) => Some(format!("Bearer {}", secret)),
        }
    }
}

/// 判断入站头是否为服务令牌 (`ServiceToken <secret>`)
pub fn is_service_token(header: Option<&str>) -> bool {
    match header {
        Some(value) => value.split_whitespace().next() == Some("ServiceToken"),
        None => false,
    }
}

/// 校验 bearer 头形状并取出令牌本体
///
/// 只做形状检查: scheme 必须是字面量 `Bearer`,令牌必须是
/// 三段点分的 JWT。不做签名校验,签名由上游负责;
/// 这里的拒绝发生在任何上游调用之前。
pub fn validate_bearer(header: Option<&str>) -> GatewayResult<String> {
    let value =
        header.ok_or_else(|| GatewayError::InvalidAuth("token not found".to_string()))?;

    let mut parts = value.split_whitespace();
    if parts.next() != Some("Bearer") {
        return Err(GatewayError::InvalidAuth(
            "not a valid bearer token".to_string(),
        ));
    }
    let token = parts
        .next()
        .ok_or_else(|| GatewayError::InvalidAuth("not a valid bearer token".to_string()))?;

    if token.split('.').count() != 3 {
        return Err(GatewayError::InvalidAuth("not a valid token".to_string()));
    }

    Ok(token.to_string())
}

/// 凭据决策
///
/// 顺序固定:
/// 1. 入站是服务令牌 -> 无视模式,换用令牌本体
/// 2. basicauth -> 配置的用户名/密码对
/// 3. oidc 且有入站令牌 -> 原样透传
/// 4. 其余情况不带凭据,让上游自己回 401
pub fn resolve(
    mode: AuthMode,
    inbound: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
) -> Credential {
    if is_service_token(inbound) {
        let secret = inbound
            .and_then(|value| value.split_whitespace().nth(1))
            .unwrap_or_default();
        return Credential::ServiceToken(secret.to_string());
    }

    match mode {
        AuthMode::Basic => match (username, password) {
            (Some(user), Some(pass)) => Credential::BasicPair {
                username: user.to_string(),
                password: pass.to_string(),
            },
            // 启动校验保证 basicauth 模式下有凭据,这里兜底不带头
            _ => Credential::None,
        },
        AuthMode::Oidc => match inbound {
            Some(token) => Credential::BearerToken(token.to_string()),
            None => Credential::None,
        },
    }
}
