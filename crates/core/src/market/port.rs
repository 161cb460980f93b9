use crate::common::TimeFrame;
use crate::market::entity::Candle;
use crate::market::error::MarketError;
use crate::symbol::entity::CanonicalSymbol;
use async_trait::async_trait;

/// # Summary
/// 市场行情数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 实现者只负责单次抓取，不做重试与缓存。
/// - 网络或可用性故障必须以 `MarketError` 返回，不得 panic。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 获取特定证券在指定时间范围内的 K 线数据。
    ///
    /// # Logic
    /// 1. 验证时间范围合法性。
    /// 2. 将 `TimeFrame` 映射为数据源的 interval 并构建请求。
    /// 3. 执行网络请求并解析响应数据。
    ///
    /// # Arguments
    /// * `symbol`: 规范化后的证券代码。
    /// * `time_frame`: 取样周期。
    /// * `start`: 开始时间。
    /// * `end`: 结束时间。
    ///
    /// # Returns
    /// 成功返回 K 线列表 (可能为空)，失败返回 MarketError。
    async fn fetch_candles(
        &self,
        symbol: &CanonicalSymbol,
        time_frame: TimeFrame,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Candle>, MarketError>;
}
