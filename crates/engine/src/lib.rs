//! # `kagami-engine` - 镜像投影引擎
//!
//! 输入外部提供的收盘价序列，输出均线与镜像投影结果。
//! 纯函数实现：不抓取数据、不记录日志、不持有任何共享状态。

pub mod average;
pub mod mirror;
pub mod window;

pub use average::{moving_averages, simple_moving_average};
pub use mirror::{end_of_day, project};
