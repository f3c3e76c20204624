// proxy 模块 - OSCAR 上游转发

pub mod auth;
pub mod mime;
pub mod run;
pub mod upstream;

pub use auth::Credential;
pub use upstream::{ForwardBody, ForwardResult, UpstreamClient};

/// 上游 API 路径
pub mod paths {
    pub const INFO: &str = "/system/info/";
    pub const CONFIG: &str = "/system/config/";
    pub const HEALTH: &str = "/health";
    pub const SERVICES: &str = "/system/services/";
    pub const LOGS: &str = "/system/logs/";
    pub const RUN: &str = "/run/";
}
