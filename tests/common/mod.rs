#![allow(dead_code)]

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use oscar_gateway::api::build_routes;
use oscar_gateway::core::models::{AuthMode, GatewayConfig};
use oscar_gateway::state::AppState;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// PNG 魔数开头的样例载荷
pub const PNG_PAYLOAD: [u8; 10] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];

#[derive(Clone)]
pub struct CallRecord {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

/// 模拟上游记录下来的全部调用
#[derive(Default)]
pub struct Recorded {
    calls: Mutex<Vec<CallRecord>>,
}

impl Recorded {
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn calls_to(&self, prefix: &str) -> Vec<CallRecord> {
        self.calls()
            .into_iter()
            .filter(|call| call.path.starts_with(prefix))
            .collect()
    }
}

/// 模拟 OSCAR 上游,单个 fallback 记录并应答所有请求
async fn mock_upstream(State(recorded): State<Arc<Recorded>>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map(|bytes| bytes.to_vec())
        .unwrap_or_default();

    recorded.calls.lock().expect("calls lock").push(CallRecord {
        method: method.clone(),
        path: path.clone(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    // 任意方法的 /status/:code 都原样应答该状态码
    if let Some(code) = path.strip_prefix("/status/") {
        if code == "204" {
            return StatusCode::NO_CONTENT.into_response();
        }
        let status = code
            .parse::<u16>()
            .ok()
            .and_then(|value| StatusCode::from_u16(value).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, format!("upstream says {}", code)).into_response();
    }

    match (method.as_str(), path.as_str()) {
        ("GET", "/system/info/") => {
            Json(json!({"version": "3.2.2", "name": "oscar"})).into_response()
        }
        // /system/config/ 要求凭据,用来测 401 的透传
        ("GET", "/system/config/") => {
            if authorization.is_none() {
                StatusCode::UNAUTHORIZED.into_response()
            } else {
                Json(json!({"name": "oscar", "namespace": "oscar-svc"})).into_response()
            }
        }
        ("GET", "/health") => "Ok".into_response(),
        ("GET", "/system/services/") => {
            Json(json!([{"name": "figlet", "token": "svc-sekret"}])).into_response()
        }
        ("POST", "/system/services/") => {
            (StatusCode::CREATED, "ignored-by-contract").into_response()
        }
        ("PUT", "/system/services/") => "service updated".into_response(),
        ("GET", "/system/logs/figlet") => {
            Json(json!([{"name": "job-1", "status": "Succeeded"}])).into_response()
        }
        ("GET", "/system/logs/figlet/job-1") => "job log line".into_response(),
        ("DELETE", _) if path.starts_with("/system/") => StatusCode::NO_CONTENT.into_response(),
        ("GET", _) if path.starts_with("/system/services/") => service_descriptor(
            path.trim_start_matches("/system/services/"),
            authorization.as_deref(),
        ),
        ("POST", _) if path.starts_with("/run/") => {
            run_reply(path.trim_start_matches("/run/"), &body)
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn service_descriptor(name: &str, authorization: Option<&str>) -> Response {
    match name {
        "figlet" => Json(json!({"name": "figlet", "token": "svc-sekret"})).into_response(),
        "echo" => Json(json!({"name": "echo", "token": "echo-sekret"})).into_response(),
        "jsonsvc" => Json(json!({"name": "jsonsvc", "token": "json-sekret"})).into_response(),
        "tokenless" => Json(json!({"name": "tokenless"})).into_response(),
        "strict" => {
            if authorization.is_none() {
                StatusCode::UNAUTHORIZED.into_response()
            } else {
                Json(json!({"name": "strict", "token": "strict-sekret"})).into_response()
            }
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn run_reply(name: &str, body: &[u8]) -> Response {
    match name {
        "figlet" => STANDARD.encode(PNG_PAYLOAD).into_response(),
        "echo" => String::from_utf8_lossy(body).into_owned().into_response(),
        "jsonsvc" => Json(json!({"result": 42})).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// 在临时端口上拉起模拟上游,返回入口地址和记录器
pub async fn spawn_mock_upstream() -> (String, Arc<Recorded>) {
    let recorded = Arc::new(Recorded::default());
    let app = Router::new()
        .fallback(mock_upstream)
        .with_state(recorded.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock upstream");
    let addr = listener.local_addr().expect("mock upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("serve mock upstream");
    });
    (format!("http://{}", addr), recorded)
}

/// 在临时端口上拉起完整网关,返回对外地址
pub async fn spawn_gateway(config: GatewayConfig) -> String {
    let state = Arc::new(AppState::new(config).expect("gateway state"));
    let app = build_routes(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind gateway");
    let addr = listener.local_addr().expect("gateway addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("serve gateway");
    });
    format!("http://{}", addr)
}

pub fn oidc_gateway_config(endpoint: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.oscar_endpoint = endpoint.to_string();
    config.auth_type = AuthMode::Oidc;
    config
}

pub fn basic_gateway_config(endpoint: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.oscar_endpoint = endpoint.to_string();
    config.auth_type = AuthMode::Basic;
    config.username = Some("user".to_string());
    config.password = Some("pass".to_string());
    config
}
