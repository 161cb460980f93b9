use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::projection::error::ProjectionError;

/// 收盘价绝对值上限 (1e15)。
/// 序列内任意价格均不超过该值，镜像与均线累加不会溢出 `Decimal`。
pub const MAX_ABS_CLOSE: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// # Summary
/// 单根 K 线数据实体，由行情提供者返回的原始记录。
///
/// # Invariants
/// - `high` 必须大于或等于 `low`, `open`, `close`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    // K 线开始时间
    pub time: DateTime<Utc>,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 调整后收盘价 (用于处理分红、拆股等复权情况)
    pub adj_close: Option<f64>,
    // 成交量
    pub volume: f64,
    // 是否为最终数据 (即该周期已收盘)
    pub is_final: bool,
}

/// # Summary
/// 价格点：某一时刻的收盘价。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: DateTime<Utc>,
    pub close: Decimal,
}

impl PricePoint {
    pub fn new(time: DateTime<Utc>, close: Decimal) -> Self {
        Self { time, close }
    }
}

/// # Summary
/// 收盘价时间序列。
///
/// # Invariants
/// - 时间戳严格递增且唯一。
/// - 构造后不可变，引擎只读取不修改。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// # Summary
    /// 以已排序的价格点构造序列。
    ///
    /// # Logic
    /// 1. 逐对检查相邻价格点，要求后者时间严格大于前者。
    /// 2. 发现乱序或重复时间戳即返回错误，不做静默修正。
    /// 3. 收盘价绝对值超过 [`MAX_ABS_CLOSE`] 返回 `PriceOutOfRange`。
    ///
    /// # Arguments
    /// * `points`: 按时间升序排列的价格点。
    ///
    /// # Returns
    /// 成功返回序列，否则返回 `ProjectionError::Unordered` 或 `PriceOutOfRange`。
    pub fn new(points: Vec<PricePoint>) -> Result<Self, ProjectionError> {
        if let Some(index) = points.iter().position(|p| p.close.abs() > MAX_ABS_CLOSE) {
            return Err(ProjectionError::PriceOutOfRange { index });
        }
        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].time <= pair[0].time)
        {
            return Err(ProjectionError::Unordered { index: index + 1 });
        }
        Ok(Self { points })
    }

    /// # Summary
    /// 将提供者返回的 K 线规整为收盘价序列。
    ///
    /// # Logic
    /// 1. 跳过收盘价无法表示为十进制数 (NaN / 无穷) 或超出 [`MAX_ABS_CLOSE`] 的记录。
    /// 2. 按时间稳定排序。
    /// 3. 相同时间戳只保留最后一条 (盘中快照会被收盘数据覆盖)。
    ///
    /// # Arguments
    /// * `candles`: 原始 K 线列表，顺序不限。
    ///
    /// # Returns
    /// 满足序列不变量的 `PriceSeries`。
    pub fn from_candles(candles: &[Candle]) -> Self {
        let mut points: Vec<PricePoint> = candles
            .iter()
            .filter_map(|c| {
                Decimal::try_from(c.close)
                    .ok()
                    .filter(|close| close.abs() <= MAX_ABS_CLOSE)
                    .map(|close| PricePoint::new(c.time, close))
            })
            .collect();
        points.sort_by_key(|p| p.time);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.time == point.time => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// 收盘价视图，顺序与 `points()` 一致
    pub fn closes(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.close)
    }

    /// # Summary
    /// 返回时间不晚于 `end` (不含) 的前缀切片。
    ///
    /// # Logic
    /// 序列有序，使用二分查找定位第一个 `time >= end` 的位置。
    pub fn prefix_before(&self, end: DateTime<Utc>) -> &[PricePoint] {
        let idx = self.points.partition_point(|p| p.time < end);
        &self.points[..idx]
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<PricePoint>::deserialize(deserializer)?;
        PriceSeries::new(points).map_err(serde::de::Error::custom)
    }
}
