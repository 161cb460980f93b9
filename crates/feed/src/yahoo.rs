use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use kagami_core::common::TimeFrame;
use kagami_core::config::FeedConfig;
use kagami_core::market::entity::Candle;
use kagami_core::market::error::MarketError;
use kagami_core::market::port::MarketDataProvider;
use kagami_core::symbol::entity::CanonicalSymbol;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// # Summary
/// Yahoo Finance 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - 每次调用只发起一次请求，不重试、不缓存。
#[derive(Clone)]
pub struct YahooProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 接口根地址，例如 `https://query1.finance.yahoo.com`
    base_url: String,
}

impl YahooProvider {
    /// # Summary
    /// 按配置创建一个新的 YahooProvider 实例。
    ///
    /// # Logic
    /// 1. 配置请求超时。
    /// 2. 设置伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    /// 3. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: 行情源配置。
    ///
    /// # Returns
    /// 成功返回 YahooProvider；Header 非法或客户端构建失败返回 `MarketError::Unknown`。
    pub fn new(config: &FeedConfig) -> Result<Self, MarketError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let user_agent = config
            .user_agent
            .parse()
            .map_err(|e| MarketError::Unknown(format!("invalid user agent: {e}")))?;
        headers.insert(reqwest::header::USER_AGENT, user_agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| MarketError::Unknown(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// 使用外部构建的客户端 (测试或自定义代理场景)
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn chart_url(&self, symbol: &CanonicalSymbol) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, symbol)
    }
}

/// # Summary
/// Yahoo API 响应顶层结构。
///
/// # Invariants
/// - 映射自 Yahoo v8 chart 接口。
#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

/// # Summary
/// Yahoo API 图表数据部分。
#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

/// Yahoo API 错误详情
#[derive(Deserialize, Debug)]
struct YahooError {
    #[serde(default)]
    code: Option<String>,
    description: String,
}

/// # Summary
/// Yahoo API 单个时间序列结果。
///
/// # Invariants
/// - 查询区间内无成交时 `timestamp` 字段整体缺失。
#[derive(Deserialize, Debug)]
struct YahooResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

/// Yahoo API 指标容器
#[derive(Deserialize, Debug)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooQuote>,
    // 调整后的价格数据
    adjclose: Option<Vec<YahooAdjClose>>,
}

/// Yahoo API 调整后价格结构
#[derive(Deserialize, Debug)]
struct YahooAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Yahoo API 原始报价数据
#[derive(Deserialize, Debug, Default)]
struct YahooQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// # Summary
/// 解析 Yahoo v8 chart 接口的 JSON 响应体。
///
/// # Logic
/// 1. 反序列化嵌套结构，失败返回 `Parse`。
/// 2. `chart.error` 存在时：`Not Found` 类错误映射为 `NotFound`，其余为 `Unknown`。
/// 3. 逐个时间戳组装 K 线，仅跳过收盘价缺失的行；开高低缺失时取收盘价，成交量缺失记为 0。
/// 4. 提取 adjclose 并与基础 OHLCV 合并；历史数据一律标记为 is_final = true。
///
/// # Arguments
/// * `body`: 响应体文本。
///
/// # Returns
/// 成功返回 K 线列表 (区间内无数据时为空)。
pub fn parse_chart(body: &str) -> Result<Vec<Candle>, MarketError> {
    let json: YahooResponse =
        serde_json::from_str(body).map_err(|e| MarketError::Parse(e.to_string()))?;

    if let Some(err) = json.chart.error {
        return match err.code.as_deref() {
            Some("Not Found") => Err(MarketError::NotFound),
            _ => Err(MarketError::Unknown(err.description)),
        };
    }

    let result = json
        .chart
        .result
        .and_then(|mut results| results.pop())
        .ok_or(MarketError::NotFound)?;

    if result.timestamp.is_empty() {
        return Ok(Vec::new());
    }

    let quote = result
        .indicators
        .quote
        .first()
        .ok_or(MarketError::Parse("No quote data".into()))?;

    let adj_close_list = result
        .indicators
        .adjclose
        .as_ref()
        .and_then(|v| v.first())
        .map(|v| &v.adjclose);

    let mut candles = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let Some(time) = Utc.timestamp_opt(ts, 0).single() else {
            continue;
        };
        let field = |values: &[Option<f64>]| values.get(i).copied().flatten();
        let Some(close) = field(&quote.close) else {
            continue;
        };
        candles.push(Candle {
            time,
            open: field(&quote.open).unwrap_or(close),
            high: field(&quote.high).unwrap_or(close),
            low: field(&quote.low).unwrap_or(close),
            close,
            adj_close: adj_close_list.and_then(|list| field(list)),
            volume: field(&quote.volume).unwrap_or(0.0),
            is_final: true,
        });
    }

    Ok(candles)
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    /// # Summary
    /// 从 Yahoo Finance 抓取 K 线历史数据。
    ///
    /// # Logic
    /// 1. 校验时间范围，`start >= end` 返回 `InvalidRange`。
    /// 2. 映射 TimeFrame 周期为 Yahoo 识别的 interval。
    /// 3. 构建包含 period1, period2 的 API URL 并发起请求。
    /// 4. 404 视为代码不存在 (`NotFound`)，其余非 2xx 视为网络错误。
    /// 5. 交由 [`parse_chart`] 解析响应体。
    async fn fetch_candles(
        &self,
        symbol: &CanonicalSymbol,
        time_frame: TimeFrame,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, MarketError> {
        if start >= end {
            return Err(MarketError::InvalidRange(format!("{start} >= {end}")));
        }

        let url = self.chart_url(symbol);
        debug!(
            "Fetching {} [{}] from {} to {}",
            symbol,
            time_frame.interval(),
            start,
            end
        );

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("period1", start.timestamp().to_string()),
                ("period2", end.timestamp().to_string()),
                ("interval", time_frame.interval().to_string()),
                ("events", "div,splits".to_string()),
            ])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            warn!("Yahoo returned 404 for {}", symbol);
            return Err(MarketError::NotFound);
        }
        if !status.is_success() {
            warn!("Yahoo returned HTTP {} for {}", status, symbol);
            return Err(MarketError::Network(format!("HTTP {}", status)));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        let candles = parse_chart(&body)?;
        debug!("Fetched {} candles for {}", candles.len(), symbol);
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_OK: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "2330.TW", "currency": "TWD"},
                "timestamp": [1735779600, 1735866000, 1736125200],
                "indicators": {
                    "quote": [{
                        "open":   [1070.0, 1080.0, null],
                        "high":   [1075.0, 1090.0, 1100.0],
                        "low":    [1060.0, 1070.0, 1080.0],
                        "close":  [1065.0, 1085.0, 1095.0],
                        "volume": [25000000, 31000000, 28000000]
                    }],
                    "adjclose": [{"adjclose": [1060.5, 1080.5, 1090.5]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_keeps_rows_with_close() {
        let candles = parse_chart(CHART_OK).unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(candles[0].close, 1065.0);
        assert_eq!(candles[0].adj_close, Some(1060.5));
        assert_eq!(candles[1].time.timestamp(), 1735866000);
        // 开盘价缺失时以收盘价补齐
        assert_eq!(candles[2].open, 1095.0);
        assert_eq!(candles[2].high, 1100.0);
        assert!(candles.iter().all(|c| c.is_final));
    }

    #[test]
    fn test_parse_chart_null_volume_keeps_row() {
        let body = r#"{"chart":{"result":[{"timestamp":[1735779600,1735866000],"indicators":{"quote":[{"close":[1.0,2.0],"volume":[10,null]}]}}],"error":null}}"#;
        let candles = parse_chart(body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].close, 2.0);
        assert_eq!(candles[1].volume, 0.0);
        assert_eq!(candles[1].open, 2.0);
        assert_eq!(candles[0].volume, 10.0);
    }

    #[test]
    fn test_parse_chart_skips_rows_without_close() {
        let body = r#"{"chart":{"result":[{"timestamp":[1735779600,1735866000],"indicators":{"quote":[{"open":[1.0,2.0],"close":[null,2.5],"volume":[10,20]}]}}],"error":null}}"#;
        let candles = parse_chart(body).unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].close, 2.5);
    }

    #[test]
    fn test_parse_chart_without_timestamps_is_empty() {
        let body = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse_chart(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_chart_error_mapping() {
        let not_found = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(matches!(parse_chart(not_found), Err(MarketError::NotFound)));

        let bad_request = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid input - interval=2d is not supported"}}}"#;
        assert!(matches!(parse_chart(bad_request), Err(MarketError::Unknown(msg)) if msg.contains("interval")));

        assert!(matches!(parse_chart("<html>"), Err(MarketError::Parse(_))));
        assert!(matches!(
            parse_chart(r#"{"chart":{"result":[],"error":null}}"#),
            Err(MarketError::NotFound)
        ));
    }
}
