// 签名分类模块 - 按魔数前缀推断载荷的 MIME 类型

/// 魔数前缀表,大写十六进制,按表序优先匹配
const SIGNATURES: &[(&str, &str)] = &[
    ("EFBBBF", "text/plain"),
    ("89504E470D0A1A0A", "image/png"),
    ("47494638", "image/gif"),
    ("FFD8FF", "image/jpeg"),
    ("504B0304", "application/zip"),
    ("667479704D534E56", "video/mp4"),
    ("52494646", "audio/wav"),
    ("494433", "audio/mpeg"),
];

/// 未命中任何签名时的兜底类型
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// 检查载荷前 8 字节的魔数,返回命中的 MIME 类型
///
/// 载荷比签名短时不算命中;空载荷直接落到兜底类型。
pub fn classify_signature(bytes: &[u8]) -> &'static str {
    let head = hex::encode_upper(&bytes[..bytes.len().min(8)]);
    SIGNATURES
        .iter()
        .find(|(signature, _)| head.starts_with(signature))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME)
}
