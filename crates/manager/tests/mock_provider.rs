use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kagami_core::common::TimeFrame;
use kagami_core::market::entity::Candle;
use kagami_core::market::error::MarketError;
use kagami_core::market::port::MarketDataProvider;
use kagami_core::symbol::entity::CanonicalSymbol;
use std::sync::Mutex;

/// 记录下来的一次抓取请求
#[derive(Debug, Clone)]
pub struct FetchCall {
    pub symbol: String,
    pub time_frame: TimeFrame,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// 返回固定结果并记录调用参数的行情提供者
pub struct MockProvider {
    response: Result<Vec<Candle>, MarketError>,
    pub calls: Mutex<Vec<FetchCall>>,
}

impl MockProvider {
    pub fn with_candles(candles: Vec<Candle>) -> Self {
        Self {
            response: Ok(candles),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: MarketError) -> Self {
        Self {
            response: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn fetch_candles(
        &self,
        symbol: &CanonicalSymbol,
        time_frame: TimeFrame,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, MarketError> {
        self.calls.lock().unwrap().push(FetchCall {
            symbol: symbol.to_string(),
            time_frame,
            start,
            end,
        });
        self.response.clone()
    }
}

pub fn candle(time: DateTime<Utc>, close: f64) -> Candle {
    Candle {
        time,
        open: close,
        high: close,
        low: close,
        close,
        adj_close: None,
        volume: 1000.0,
        is_final: true,
    }
}
