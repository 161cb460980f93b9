//! # `kagami-feed` - 行情数据源适配
//!
//! 实现 `kagami_core::market::port::MarketDataProvider`。

pub mod yahoo;
