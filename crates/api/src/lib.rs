//! # `kagami-api` - HTTP API 网关
//!
//! 本 crate 是 Kagami 镜像投影服务的 HTTP/REST 入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收浏览器或脚本的查询请求
//! - 调用下层 `MirrorService` 完成代码解析与投影计算
//! - 将领域模型转换为 DTO 返回给前端

pub mod types;
pub mod error;
pub mod routes;
pub mod server;
