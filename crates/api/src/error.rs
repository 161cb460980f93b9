//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use kagami_core::market::error::MarketError;
use kagami_core::projection::error::ProjectionError;
use kagami_manager::mirror::MirrorError;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求参数错误 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 资源未找到 (404)
    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 参数合法但数据不足以计算 (422)
    #[error("无法处理: {0}")]
    Unprocessable(String),

    /// 上游行情源失败 (502)
    #[error("上游行情源错误: {0}")]
    BadGateway(String),

    /// 下层业务错误 (500)
    #[error("内部服务错误: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadGateway(msg) => {
                tracing::warn!("上游行情源错误: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            ApiError::Internal(msg) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!("内部服务错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "服务器内部错误".to_string(),
                )
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 查询串无法解析 (缺少字段、类型错误) 时同样返回 JSON 错误体
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// 从 `MirrorError` 转换
impl From<MirrorError> for ApiError {
    fn from(err: MirrorError) -> Self {
        let message = err.to_string();
        match err {
            MirrorError::Resolution(_) => ApiError::BadRequest(message),
            MirrorError::Projection(ProjectionError::EmptySeries) => ApiError::NotFound(message),
            MirrorError::Projection(ProjectionError::InsufficientHistory { .. }) => {
                ApiError::Unprocessable(message)
            }
            MirrorError::Projection(_) => ApiError::BadRequest(message),
            MirrorError::DataUnavailable {
                source: MarketError::NotFound,
                ..
            } => ApiError::NotFound(message),
            MirrorError::DataUnavailable {
                source: MarketError::InvalidRange(_),
                ..
            } => ApiError::Internal(message),
            MirrorError::DataUnavailable { .. } => ApiError::BadGateway(message),
        }
    }
}
