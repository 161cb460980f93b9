//! # 路由控制器

pub mod mirror;
pub mod symbol;
