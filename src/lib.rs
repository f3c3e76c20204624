//! OSCAR API 网关
//! 把入站 HTTP 调用换上凭据转发给 OSCAR 集群

pub mod api;
pub mod core;
pub mod proxy;
pub mod state;
