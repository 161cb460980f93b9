use thiserror::Error;

/// # Summary
/// 代码解析错误枚举。
///
/// # Invariants
/// - 解析器为纯字符串逻辑，错误只可能来自输入本身。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    // 去除空白后输入为空
    #[error("Empty input")]
    EmptyInput,
    // 既不是别名，也不是可识别的交易所代码或外国代码
    #[error("Unrecognized symbol format: {0}")]
    UnrecognizedFormat(String),
}
