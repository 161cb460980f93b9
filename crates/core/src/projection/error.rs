use thiserror::Error;

/// # Summary
/// 镜像投影计算错误枚举。
///
/// # Invariants
/// - 一旦返回错误，调用方不得得到任何部分结果 (例如截短的投影)。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    // 序列为空，与回测截止日无关
    #[error("Price series is empty")]
    EmptySeries,
    // 计算视图中的数据不足以覆盖回看窗口
    #[error("Insufficient history: need {required} points, have {available}")]
    InsufficientHistory { required: usize, available: usize },
    // 回看天数超出允许区间
    #[error("Lookback days {value} out of range {min}..={max}")]
    LookbackOutOfRange { value: usize, min: usize, max: usize },
    // 序列时间戳非严格递增
    #[error("Price series is not strictly ascending at index {index}")]
    Unordered { index: usize },
    // 价格超出可安全计算的范围
    #[error("Price at index {index} is out of range")]
    PriceOutOfRange { index: usize },
}
