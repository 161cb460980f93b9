use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::market::entity::PricePoint;

/// 均线窗口 (单位：观测点个数)
pub const MOVING_AVERAGE_WINDOWS: [usize; 3] = [30, 50, 100];

/// 允许的回看天数区间
pub const LOOKBACK_RANGE: RangeInclusive<usize> = 10..=60;

/// 未指定时的回看天数
pub const DEFAULT_LOOKBACK_DAYS: usize = 20;

/// # Summary
/// 镜像投影结果，供外部渲染器绘制。
///
/// # Invariants
/// - `projected_series.len() == lookback_days`。
/// - 第 i 个投影点的时间 = `reference_date` + i 个自然日。
/// - `moving_averages` 中每条序列与输入的完整序列一一对齐。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    // 参考价 (计算视图最后一个收盘价)
    pub reference_price: Decimal,
    // 参考日 (计算视图最后一个时间戳)，图上以竖线标示
    pub reference_date: DateTime<Utc>,
    // 窗口大小 -> 均线值；窗口不足的位置为 None
    pub moving_averages: BTreeMap<usize, Vec<Option<Decimal>>>,
    // 镜像投影点
    pub projected_series: Vec<PricePoint>,
    // 回看天数
    pub lookback_days: usize,
    // 回测截止日；实时模式为 None
    pub cutoff: Option<NaiveDate>,
    // 完整序列的最后一个点，回测模式下用于对照真实走势
    pub latest_actual: PricePoint,
}

impl ProjectionResult {
    /// 是否为回测模式
    pub fn is_backtest(&self) -> bool {
        self.cutoff.is_some()
    }

    /// 指定窗口的均线序列
    pub fn moving_average(&self, window: usize) -> Option<&[Option<Decimal>]> {
        self.moving_averages.get(&window).map(Vec::as_slice)
    }
}
