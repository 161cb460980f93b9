use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod time;
pub mod tls;

/// # Summary
/// 取样周期枚举，决定行情抓取的时间跨度与 K 线粒度。
///
/// # Invariants
/// - 每个周期都对应唯一的数据源 interval 与抓取窗口长度。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    // 日线
    #[default]
    Daily,
    // 周线
    Weekly,
    // 月线
    Monthly,
}

impl TimeFrame {
    /// # Summary
    /// 返回数据源识别的 K 线间隔标识。
    ///
    /// # Returns
    /// `1d`、`1wk` 或 `1mo`。
    pub fn interval(&self) -> &'static str {
        match self {
            TimeFrame::Daily => "1d",
            TimeFrame::Weekly => "1wk",
            TimeFrame::Monthly => "1mo",
        }
    }

    /// # Summary
    /// 返回该周期向前回溯抓取的时间长度。
    ///
    /// # Logic
    /// - 日线约一年 (300 天)，足够覆盖 100 日均线。
    /// - 周线约三年 (150 周)。
    /// - 月线约十年。
    pub fn fetch_window(&self) -> Duration {
        match self {
            TimeFrame::Daily => Duration::days(300),
            TimeFrame::Weekly => Duration::weeks(150),
            TimeFrame::Monthly => Duration::days(365 * 10),
        }
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" | "d" | "day" | "daily" => Ok(TimeFrame::Daily),
            "1wk" | "1w" | "w" | "week" | "weekly" => Ok(TimeFrame::Weekly),
            "1mo" | "m" | "month" | "monthly" => Ok(TimeFrame::Monthly),
            _ => Err(format!("Unknown TimeFrame: {}", s)),
        }
    }
}

impl std::fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeFrame::Daily => write!(f, "daily"),
            TimeFrame::Weekly => write!(f, "weekly"),
            TimeFrame::Monthly => write!(f, "monthly"),
        }
    }
}
