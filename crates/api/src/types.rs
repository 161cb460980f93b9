//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。
//! 价格一律以十进制字符串输出，避免浮点误差。

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use kagami_core::market::entity::PricePoint;
use kagami_core::symbol::entity::Resolution;
use kagami_manager::mirror::MirrorReport;

// ============================================================
//  代码解析 DTO
// ============================================================

/// 代码解析结果 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResolveResponse {
    /// 原始输入 (已去除首尾空白)
    #[schema(example = "台積電")]
    pub input: String,
    /// 规范化后的行情代码
    #[schema(example = "2330.TW")]
    pub symbol: String,
    /// 代码是否与输入不同 (用于前端提示)
    #[schema(example = true)]
    pub substituted: bool,
    /// 命中的别名 (若有)
    #[schema(example = "台積電")]
    pub alias: Option<String>,
}

impl From<&Resolution> for ResolveResponse {
    fn from(resolution: &Resolution) -> Self {
        Self {
            input: resolution.input.clone(),
            symbol: resolution.symbol.to_string(),
            substituted: resolution.is_substituted(),
            alias: resolution.alias.clone(),
        }
    }
}

// ============================================================
//  镜像投影 DTO
// ============================================================

/// 单个价格点 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PricePointResponse {
    /// 时间 (RFC 3339, UTC)
    #[schema(example = "2025-01-31T01:00:00+00:00")]
    pub time: String,
    /// 收盘价
    #[schema(example = "1085.00")]
    pub close: String,
}

impl From<&PricePoint> for PricePointResponse {
    fn from(point: &PricePoint) -> Self {
        Self {
            time: point.time.to_rfc3339(),
            close: point.close.to_string(),
        }
    }
}

/// 均线序列 DTO，与 `history` 逐点对齐，窗口未满处为 null
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovingAverageResponse {
    /// 窗口大小
    #[schema(example = 30)]
    pub window: usize,
    /// 均线值
    pub values: Vec<Option<String>>,
}

/// 镜像投影结果 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MirrorResponse {
    /// 代码解析结果
    pub resolution: ResolveResponse,
    /// 取样周期
    #[schema(example = "daily")]
    pub time_frame: String,
    /// 回看天数
    #[schema(example = 20)]
    pub lookback_days: usize,
    /// 回测截止日 (实时模式为 null)
    #[schema(example = "2025-01-31")]
    pub backtest_date: Option<String>,
    /// 参考价
    #[schema(example = "1085.00")]
    pub reference_price: String,
    /// 参考日
    #[schema(example = "2025-01-31T01:00:00+00:00")]
    pub reference_date: String,
    /// 最新实际收盘 (回测模式下独立于参考价)
    pub latest_actual: PricePointResponse,
    /// 完整历史序列
    pub history: Vec<PricePointResponse>,
    /// 30/50/100 日均线
    pub moving_averages: Vec<MovingAverageResponse>,
    /// 投影序列 (前端以虚线绘制)
    pub projection: Vec<PricePointResponse>,
}

impl From<&MirrorReport> for MirrorResponse {
    fn from(report: &MirrorReport) -> Self {
        let projection = &report.projection;
        Self {
            resolution: ResolveResponse::from(&report.resolution),
            time_frame: report.time_frame.to_string(),
            lookback_days: projection.lookback_days,
            backtest_date: projection.cutoff.map(|d| d.to_string()),
            reference_price: projection.reference_price.to_string(),
            reference_date: projection.reference_date.to_rfc3339(),
            latest_actual: PricePointResponse::from(&projection.latest_actual),
            history: report
                .history
                .points()
                .iter()
                .map(PricePointResponse::from)
                .collect(),
            moving_averages: projection
                .moving_averages
                .iter()
                .map(|(window, values)| MovingAverageResponse {
                    window: *window,
                    values: values
                        .iter()
                        .map(|v| v.map(|d| d.to_string()))
                        .collect(),
                })
                .collect(),
            projection: projection
                .projected_series
                .iter()
                .map(PricePointResponse::from)
                .collect(),
        }
    }
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
