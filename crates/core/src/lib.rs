//! # `kagami-core` - 领域核心
//!
//! 定义镜像投影系统各 crate 共享的实体、错误与端口 (Port)。
//! 本 crate 不包含任何 I/O 实现，具体实现分布在 `kagami-feed`、
//! `kagami-symbol`、`kagami-engine` 等下游 crate 中。

pub mod common;
pub mod config;
pub mod market;
pub mod projection;
pub mod symbol;
