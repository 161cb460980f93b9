use chrono::{DateTime, NaiveDate, Utc};
use kagami_core::common::TimeFrame;
use kagami_core::common::time::TimeProvider;
use kagami_core::market::entity::PriceSeries;
use kagami_core::market::error::MarketError;
use kagami_core::market::port::MarketDataProvider;
use kagami_core::projection::entity::{LOOKBACK_RANGE, ProjectionResult};
use kagami_core::projection::error::ProjectionError;
use kagami_core::symbol::entity::{CanonicalSymbol, Resolution};
use kagami_core::symbol::error::ResolutionError;
use kagami_engine::{end_of_day, project};
use kagami_symbol::SymbolResolver;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// # Summary
/// Manager 层的统一错误类型。
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),
    #[error("Data unavailable for {symbol}: {source}")]
    DataUnavailable {
        symbol: CanonicalSymbol,
        #[source]
        source: MarketError,
    },
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),
}

/// # Summary
/// 一次镜像投影查询。
#[derive(Debug, Clone)]
pub struct MirrorRequest {
    // 用户输入：代码或中文名称
    pub query: String,
    // 回看天数 (10..=60)
    pub lookback_days: usize,
    // 取样周期
    pub time_frame: TimeFrame,
    // 回测截止日，None 为实时模式
    pub backtest_date: Option<NaiveDate>,
}

/// # Summary
/// 提供给渲染器的完整结果包。
///
/// # Invariants
/// - `history` 为抓取到的完整序列 (显示视图)，回测模式下同样包含截止日之后的数据。
#[derive(Debug, Clone, Serialize)]
pub struct MirrorReport {
    pub query: String,
    pub resolution: Resolution,
    pub time_frame: TimeFrame,
    pub history: PriceSeries,
    pub projection: ProjectionResult,
}

/// # Summary
/// 镜像投影应用服务，系统的门面 (Facade)。
/// 编译期仅依赖 `kagami-core` 中的端口定义，行情源与时钟通过构造函数注入。
///
/// # Invariants
/// - 无可变状态，可被多个并发请求共享。
/// - 每次查询至多发起一次行情抓取。
pub struct MirrorService {
    // 行情提供者
    provider: Arc<dyn MarketDataProvider>,
    // 代码解析器 (别名表只读共享)
    resolver: Arc<SymbolResolver>,
    // 时钟
    clock: Arc<dyn TimeProvider>,
}

impl MirrorService {
    /// # Summary
    /// 创建 MirrorService 实例。
    ///
    /// # Arguments
    /// * `provider` - 行情提供者的具体实现。
    /// * `resolver` - 代码解析器。
    /// * `clock` - 时钟，决定“今天”。
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        resolver: Arc<SymbolResolver>,
        clock: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            provider,
            resolver,
            clock,
        }
    }

    /// # Summary
    /// 解析用户输入，发生替换时记录提示。
    pub fn resolve(&self, query: &str) -> Result<Resolution, MirrorError> {
        let resolution = self.resolver.resolve_detailed(query)?;
        if resolution.is_substituted() {
            info!(
                "Resolved input [{}] to [{}]{}",
                resolution.input,
                resolution.symbol,
                resolution
                    .alias
                    .as_ref()
                    .map(|_| " via alias table")
                    .unwrap_or_default()
            );
        }
        Ok(resolution)
    }

    /// # Summary
    /// 计算抓取区间。
    ///
    /// # Logic
    /// 1. 结束时间为当前时间，开始时间为结束时间减去周期对应的抓取窗口。
    /// 2. 回测截止日早于当前时间时，开始时间前移到 `截止日日终 - 抓取窗口`，
    ///    保证计算视图与实时模式拥有同样长度的历史。
    pub fn fetch_range(
        &self,
        time_frame: TimeFrame,
        backtest_date: Option<NaiveDate>,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let window = time_frame.fetch_window();
        let end = self.clock.now();
        let mut start = end - window;

        if let Some(date) = backtest_date {
            let cutoff_end = end_of_day(date);
            if cutoff_end < end {
                if let Some(backtest_start) = cutoff_end.checked_sub_signed(window) {
                    start = start.min(backtest_start);
                }
            }
        }
        (start, end)
    }

    /// # Summary
    /// 执行一次完整查询。
    ///
    /// # Logic
    /// 1. 解析代码。
    /// 2. 校验回看天数，非法时在抓取之前直接返回。
    /// 3. 按周期与回测日期计算区间并抓取行情，失败归类为 `DataUnavailable`。
    /// 4. 规整为收盘价序列并调用投影引擎。
    ///
    /// # Returns
    /// 成功返回 `MirrorReport`，任一步失败均不产生部分结果。
    pub async fn run(&self, request: MirrorRequest) -> Result<MirrorReport, MirrorError> {
        let resolution = self.resolve(&request.query)?;

        if !LOOKBACK_RANGE.contains(&request.lookback_days) {
            return Err(ProjectionError::LookbackOutOfRange {
                value: request.lookback_days,
                min: *LOOKBACK_RANGE.start(),
                max: *LOOKBACK_RANGE.end(),
            }
            .into());
        }

        let (start, end) = self.fetch_range(request.time_frame, request.backtest_date);
        let candles = self
            .provider
            .fetch_candles(&resolution.symbol, request.time_frame, start, end)
            .await
            .map_err(|source| {
                warn!("Fetch failed for [{}]: {}", resolution.symbol, source);
                MirrorError::DataUnavailable {
                    symbol: resolution.symbol.clone(),
                    source,
                }
            })?;

        let history = PriceSeries::from_candles(&candles);
        let projection = project(&history, request.lookback_days, request.backtest_date)?;

        info!(
            "Projected [{}] {} x{}: reference {} @ {}{}",
            resolution.symbol,
            request.time_frame,
            request.lookback_days,
            projection.reference_price,
            projection.reference_date,
            request
                .backtest_date
                .map(|d| format!(" (backtest {d})"))
                .unwrap_or_default()
        );

        Ok(MirrorReport {
            query: request.query,
            resolution,
            time_frame: request.time_frame,
            history,
            projection,
        })
    }
}
