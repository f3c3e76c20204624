//! 核心数据模型

mod config;
mod service;

pub use config::{AuthMode, GatewayConfig};
pub use service::{RunOutcome, ServiceDescriptor};
