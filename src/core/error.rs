//! 错误类型
//! 请求路径上的错误都收敛到这一个枚举

use thiserror::Error;

/// 网关错误分类
///
/// 上游的状态码契约和入站凭据校验共用同一套分类,
/// 对调用方的状态码映射在 api::common 里完成。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// 入站凭据形状不合法,在任何上游调用之前就被拒绝
    #[error("authorization error: {0}")]
    InvalidAuth(String),

    /// 上游以 401 拒绝了凭据
    #[error("invalid credentials")]
    Unauthorized,

    /// 上游找不到目标资源
    #[error("not found: {0}")]
    NotFound(String),

    /// 其余非 2xx 状态,原样携带状态码
    #[error("HTTP error! status: {0}")]
    Http(u16),

    /// 2xx 中不在契约内的状态 (POST/PUT 只认 200/201)
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// 连接失败、超时或响应体读取失败
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
