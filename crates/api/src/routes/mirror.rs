//! # 镜像投影路由控制器
//!
//! 实现 `/api/v1/mirror` 接口：解析代码、抓取行情并返回投影结果。

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use kagami_core::common::TimeFrame;
use kagami_manager::mirror::MirrorRequest;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, MirrorResponse};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct MirrorQuery {
    pub q: String,
    pub lookback: Option<usize>,
    pub tf: Option<String>,
    pub backtest: Option<String>,
}

impl MirrorQuery {
    /// 按配置默认值补全查询参数，周期或日期格式非法时返回 `BadRequest`
    fn into_request(self, state: &AppState) -> Result<MirrorRequest, ApiError> {
        let defaults = &state.config.projection;

        let time_frame = match self.tf.as_deref() {
            Some(tf) => tf.parse::<TimeFrame>().map_err(ApiError::BadRequest)?,
            None => defaults.default_time_frame,
        };

        let backtest_date = self
            .backtest
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|e| ApiError::BadRequest(format!("invalid backtest date [{s}]: {e}")))
            })
            .transpose()?;

        Ok(MirrorRequest {
            query: self.q,
            lookback_days: self.lookback.unwrap_or(defaults.default_lookback_days),
            time_frame,
            backtest_date,
        })
    }
}

/// 计算镜像投影
///
/// 以参考日为轴，将最近 `lookback` 个收盘价镜像到未来。
/// 指定 `backtest` 时参考日取截止日当天或之前最近的交易日，历史与均线仍为完整序列。
#[utoipa::path(
    get,
    path = "/api/v1/mirror",
    tag = "投影 (Mirror)",
    params(
        ("q" = String, Query, description = "代码或中文名称"),
        ("lookback" = Option<usize>, Query, description = "回看天数 10..=60，默认 20"),
        ("tf" = Option<String>, Query, description = "周期 daily / weekly / monthly"),
        ("backtest" = Option<String>, Query, description = "回测截止日 YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "投影成功", body = ApiResponse<MirrorResponse>),
        (status = 400, description = "参数非法", body = crate::types::ApiErrorResponse),
        (status = 404, description = "代码无行情数据", body = crate::types::ApiErrorResponse),
        (status = 422, description = "历史数据不足", body = crate::types::ApiErrorResponse),
        (status = 502, description = "行情源不可用", body = crate::types::ApiErrorResponse)
    )
)]
pub async fn get_mirror(
    State(state): State<AppState>,
    query: Result<Query<MirrorQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<MirrorResponse>>, ApiError> {
    let Query(query) = query?;
    let request = query.into_request(&state)?;
    let report = state.service.run(request).await?;
    Ok(Json(ApiResponse::ok(MirrorResponse::from(&report))))
}
