//! # 代码解析路由控制器
//!
//! 实现 `/api/v1/symbols` 路径下的 REST 接口，不触发行情抓取。

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, ResolveResponse};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ResolveQuery {
    pub q: String,
}

/// 解析股票代码或中文名称
///
/// 纯数字代码补全交易所后缀，中文名称经别名表替换，海外代码规范化分隔符。
#[utoipa::path(
    get,
    path = "/api/v1/symbols/resolve",
    tag = "代码 (Symbol)",
    params(
        ("q" = String, Query, description = "代码或中文名称，例如 2330、台積電、BRK.B")
    ),
    responses(
        (status = 200, description = "解析成功", body = ApiResponse<ResolveResponse>),
        (status = 400, description = "输入为空或格式无法识别", body = crate::types::ApiErrorResponse)
    )
)]
pub async fn resolve_symbol(
    State(state): State<AppState>,
    query: Result<Query<ResolveQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ResolveResponse>>, ApiError> {
    let Query(query) = query?;
    let resolution = state.service.resolve(&query.q)?;
    Ok(Json(ApiResponse::ok(ResolveResponse::from(&resolution))))
}
