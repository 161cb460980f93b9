use kagami_core::market::entity::PriceSeries;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::window::RollingWindow;

/// # Summary
/// 简单移动平均 (SMA)。
///
/// # Logic
/// 1. 以固定容量的滚动窗口维护最近 `window` 个观测值及其累加和。
/// 2. 每推入一个新值，累加和加上新值、减去被挤出的旧值。
/// 3. 窗口填满之前的位置输出 None，绝不以短窗口计算。
///
/// 均值基于“最近 N 个实际存在的观测值”，非交易日缺口不做插值。
///
/// # Arguments
/// * `closes`: 按时间升序的收盘价。
/// * `window`: 窗口大小；为 0 时所有位置均为 None。
///
/// # Returns
/// 与输入一一对齐的均线序列。
pub fn simple_moving_average<I>(closes: I, window: usize) -> Vec<Option<Decimal>>
where
    I: IntoIterator<Item = Decimal>,
{
    if window == 0 {
        return closes.into_iter().map(|_| None).collect();
    }

    let divisor = Decimal::from(window);
    let mut buffer = RollingWindow::new(window);
    let mut sum = Decimal::ZERO;

    closes
        .into_iter()
        .map(|close| {
            sum += close;
            if let Some(evicted) = buffer.push(close) {
                sum -= evicted;
            }
            buffer.is_full().then(|| sum / divisor)
        })
        .collect()
}

/// 在完整序列上计算多条均线，键为窗口大小
pub fn moving_averages(
    series: &PriceSeries,
    windows: &[usize],
) -> BTreeMap<usize, Vec<Option<Decimal>>> {
    windows
        .iter()
        .map(|&window| (window, simple_moving_average(series.closes(), window)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sma_leading_positions_are_undefined() {
        let closes = vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];
        let sma = simple_moving_average(closes, 3);
        assert_eq!(sma, vec![None, None, Some(dec!(2)), Some(dec!(3)), Some(dec!(4))]);
    }

    #[test]
    fn test_sma_window_longer_than_series() {
        let sma = simple_moving_average(vec![dec!(1), dec!(2)], 30);
        assert_eq!(sma, vec![None, None]);
    }

    #[test]
    fn test_sma_zero_window() {
        let sma = simple_moving_average(vec![dec!(1), dec!(2)], 0);
        assert_eq!(sma, vec![None, None]);
    }
}
