//! 核心模块
//! 配置、共享模型与错误类型

pub mod error;
pub mod models;
pub mod storage;

// 重导出常用类型
pub use error::{GatewayError, GatewayResult};
