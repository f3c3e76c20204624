//! 服务相关模型

use serde::{Deserialize, Serialize};

/// 上游服务描述的最小视图
///
/// 网关只关心调用令牌,其余字段一律原样透传,
/// 所以这里不建完整的服务模型。
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServiceDescriptor {
    pub name: String,
    /// 服务专属调用令牌,同步调用时换用它
    pub token: Option<String>,
}

/// 同步调用的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// 按载荷魔数推断出的 MIME 类型
    pub mime: String,
    /// 载荷本体,二进制内容以 base64 文本表示
    pub data: String,
}
