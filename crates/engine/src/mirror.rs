use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use kagami_core::market::entity::{PricePoint, PriceSeries};
use kagami_core::projection::entity::{LOOKBACK_RANGE, MOVING_AVERAGE_WINDOWS, ProjectionResult};
use kagami_core::projection::error::ProjectionError;

use crate::average::moving_averages;

/// # Summary
/// 回测截止日的“日终”时刻 (UTC)，即次日零点；计算视图只包含严格早于它的点。
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next) => next.and_time(NaiveTime::MIN).and_utc(),
        None => DateTime::<Utc>::MAX_UTC,
    }
}

/// # Summary
/// 计算镜像投影 (可选回测截止)。
///
/// # Logic
/// 1. 序列为空返回 `EmptySeries`；回看天数不在 10..=60 返回 `LookbackOutOfRange`。
/// 2. 选定计算视图：无截止日为完整序列，否则为截止日日终之前的前缀。
///    视图长度不足回看天数返回 `InsufficientHistory`，不会退化为更短的回看。
/// 3. 参考点 = 计算视图最后一个点。
/// 4. 均线基于完整序列计算，保证回测模式下图形的连续性。
/// 5. 取视图最后 `lookback_days` 个点，从末尾倒序取第 i 个作为过去价，
///    投影价 = 参考价 + (参考价 - 过去价)，时间 = 参考日 + i 个自然日。
///
/// # Arguments
/// * `series`: 完整收盘价序列 (只读)。
/// * `lookback_days`: 回看天数。
/// * `cutoff`: 回测截止日；None 表示实时模式。
///
/// # Returns
/// 成功返回 `ProjectionResult`，否则返回 `ProjectionError`。
pub fn project(
    series: &PriceSeries,
    lookback_days: usize,
    cutoff: Option<NaiveDate>,
) -> Result<ProjectionResult, ProjectionError> {
    let latest_actual = *series.last().ok_or(ProjectionError::EmptySeries)?;

    if !LOOKBACK_RANGE.contains(&lookback_days) {
        return Err(ProjectionError::LookbackOutOfRange {
            value: lookback_days,
            min: *LOOKBACK_RANGE.start(),
            max: *LOOKBACK_RANGE.end(),
        });
    }

    let view = match cutoff {
        Some(date) => series.prefix_before(end_of_day(date)),
        None => series.points(),
    };
    let insufficient = ProjectionError::InsufficientHistory {
        required: lookback_days,
        available: view.len(),
    };
    if view.len() < lookback_days {
        return Err(insufficient);
    }
    let reference = *view.last().ok_or(insufficient)?;

    let recent = &view[view.len() - lookback_days..];
    let mut date = reference.time;
    let projected_series = recent
        .iter()
        .rev()
        .map(|past| {
            date += Duration::days(1);
            PricePoint::new(date, reference.close + (reference.close - past.close))
        })
        .collect();

    Ok(ProjectionResult {
        reference_price: reference.close,
        reference_date: reference.time,
        moving_averages: moving_averages(series, &MOVING_AVERAGE_WINDOWS),
        projected_series,
        lookback_days,
        cutoff,
        latest_actual,
    })
}
