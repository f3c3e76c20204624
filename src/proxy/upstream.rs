//! 上游客户端
//! 面向 OSCAR REST API 的出站 HTTP 封装,统一状态码契约

use crate::core::error::{GatewayError, GatewayResult};
use crate::proxy::auth::Credential;
use anyhow::Context;
use bytes::Bytes;
use reqwest::Method;
use std::time::Duration;
use url::Url;

/// 转发结果的载荷形态
#[derive(Debug, Clone)]
pub enum ForwardBody {
    Json(serde_json::Value),
    Text(String),
    Raw(Bytes),
}

/// 上游响应的统一视图
#[derive(Debug, Clone)]
pub struct ForwardResult {
    pub status: u16,
    /// 上游声明的 Content-Type,run 流程靠它识别 JSON 载荷
    pub content_type: Option<String>,
    pub body: ForwardBody,
}

/// OSCAR 上游客户端
///
/// 无状态、可并发共享;凭据由每次调用传入,从不缓存。
pub struct UpstreamClient {
    base_url: Url,
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let base_url = Url::parse(endpoint)
            .with_context(|| format!("invalid oscar endpoint: {}", endpoint))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build http client")?;
        Ok(Self { base_url, http })
    }

    /// 以绝对路径拼出上游 URL,绝对路径会替换掉入口自带的路径
    fn build_url(&self, path: &str) -> GatewayResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::Transport(format!("invalid upstream path {}: {}", path, e)))
    }

    /// 发送请求并套用共享的状态码契约
    ///
    /// 连接失败 -> Transport,401 -> Unauthorized,404 -> NotFound,
    /// 其余非 2xx -> Http(status)。2xx 交回给各方法自行解读。
    async fn send(
        &self,
        method: Method,
        path: &str,
        auth: &Credential,
        body: Option<Bytes>,
    ) -> GatewayResult<reqwest::Response> {
        let url = self.build_url(path)?;
        tracing::info!("{} request to upstream: {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(value) = auth.authorization_value() {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }
        if let Some(payload) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload);
        }

        let response = request.send().await?;
        match response.status().as_u16() {
            401 => Err(GatewayError::Unauthorized),
            404 => Err(GatewayError::NotFound(path.to_string())),
            status if !(200..300).contains(&status) => Err(GatewayError::Http(status)),
            _ => Ok(response),
        }
    }

    /// GET,2xx 响应按 `as_text` 解析为文本或 JSON
    pub async fn get(
        &self,
        path: &str,
        auth: &Credential,
        as_text: bool,
    ) -> GatewayResult<ForwardResult> {
        let response = self.send(Method::GET, path, auth, None).await?;
        let status = response.status().as_u16();
        let content_type = content_type_of(&response);
        let body = if as_text {
            ForwardBody::Text(response.text().await?)
        } else {
            ForwardBody::Json(response.json().await?)
        };
        Ok(ForwardResult {
            status,
            content_type,
            body,
        })
    }

    /// POST,契约: 200 -> 响应体,201 -> 回显提交的载荷,
    /// 其余 2xx -> UnexpectedStatus
    pub async fn post(
        &self,
        path: &str,
        auth: &Credential,
        body: Bytes,
        raw: bool,
    ) -> GatewayResult<ForwardResult> {
        let submitted = body.clone();
        let response = self.send(Method::POST, path, auth, Some(body)).await?;
        let status = response.status().as_u16();
        let content_type = content_type_of(&response);
        match status {
            200 => {
                let body = if raw {
                    ForwardBody::Raw(response.bytes().await?)
                } else {
                    ForwardBody::Text(response.text().await?)
                };
                Ok(ForwardResult {
                    status,
                    content_type,
                    body,
                })
            }
            201 => Ok(ForwardResult {
                status,
                content_type,
                body: ForwardBody::Raw(submitted),
            }),
            other => Err(GatewayError::UnexpectedStatus(other)),
        }
    }

    /// PUT,契约与 POST 相同
    pub async fn put(
        &self,
        path: &str,
        auth: &Credential,
        body: Bytes,
    ) -> GatewayResult<ForwardResult> {
        let submitted = body.clone();
        let response = self.send(Method::PUT, path, auth, Some(body)).await?;
        let status = response.status().as_u16();
        let content_type = content_type_of(&response);
        match status {
            200 => Ok(ForwardResult {
                status,
                content_type,
                body: ForwardBody::Text(response.text().await?),
            }),
            201 => Ok(ForwardResult {
                status,
                content_type,
                body: ForwardBody::Raw(submitted),
            }),
            other => Err(GatewayError::UnexpectedStatus(other)),
        }
    }

    /// DELETE,成功时只回状态码
    pub async fn delete(&self, path: &str, auth: &Credential) -> GatewayResult<u16> {
        let response = self.send(Method::DELETE, path, auth, None).await?;
        Ok(response.status().as_u16())
    }
}

fn content_type_of(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
