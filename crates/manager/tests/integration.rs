pub mod mock_provider;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use kagami_core::common::TimeFrame;
use kagami_core::common::time::FakeClockProvider;
use kagami_core::market::error::MarketError;
use kagami_core::projection::error::ProjectionError;
use kagami_core::symbol::error::ResolutionError;
use kagami_manager::mirror::{MirrorError, MirrorRequest, MirrorService};
use kagami_symbol::SymbolResolver;
use mock_provider::{MockProvider, candle};
use rust_decimal::Decimal;
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
}

/// 120 根日线，最后一根在 2025-02-28，收盘价 1..=120
fn daily_candles() -> Vec<kagami_core::market::entity::Candle> {
    let last = Utc.with_ymd_and_hms(2025, 2, 28, 1, 0, 0).unwrap();
    (0..120)
        .map(|i| candle(last - Duration::days(119 - i), f64::from(i32::try_from(i).unwrap() + 1)))
        .collect()
}

fn service_with(provider: Arc<MockProvider>) -> MirrorService {
    MirrorService::new(
        provider,
        Arc::new(SymbolResolver::default()),
        Arc::new(FakeClockProvider::new(now())),
    )
}

fn request(query: &str, lookback_days: usize, backtest_date: Option<NaiveDate>) -> MirrorRequest {
    MirrorRequest {
        query: query.to_string(),
        lookback_days,
        time_frame: TimeFrame::Daily,
        backtest_date,
    }
}

#[tokio::test]
async fn test_live_run_resolves_fetches_and_projects() {
    let provider = Arc::new(MockProvider::with_candles(daily_candles()));
    let service = service_with(provider.clone());

    let report = service.run(request(" 台積電 ", 20, None)).await.unwrap();

    assert_eq!(report.resolution.symbol.as_str(), "2330.TW");
    assert!(report.resolution.is_substituted());
    assert_eq!(report.history.len(), 120);
    assert_eq!(report.projection.projected_series.len(), 20);
    assert_eq!(report.projection.reference_price, Decimal::from(120));
    assert_eq!(
        report.projection.reference_date,
        report.history.last().unwrap().time
    );

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].symbol, "2330.TW");
    assert_eq!(calls[0].time_frame, TimeFrame::Daily);
    assert_eq!(calls[0].end, now());
    assert_eq!(calls[0].start, now() - Duration::days(300));
}

#[tokio::test]
async fn test_backtest_run_keeps_full_history_and_extends_range() {
    let provider = Arc::new(MockProvider::with_candles(daily_candles()));
    let service = service_with(provider.clone());
    let cutoff = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

    let report = service.run(request("2330", 20, Some(cutoff))).await.unwrap();

    assert_eq!(
        report.projection.reference_date,
        Utc.with_ymd_and_hms(2025, 1, 31, 1, 0, 0).unwrap()
    );
    assert_eq!(report.history.len(), 120);
    assert_eq!(report.projection.latest_actual.close, Decimal::from(120));
    assert!(report.projection.is_backtest());

    let calls = provider.calls();
    let cutoff_end = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
    assert_eq!(calls[0].start, cutoff_end - Duration::days(300));
    assert_eq!(calls[0].end, now());
}

#[tokio::test]
async fn test_future_backtest_date_keeps_live_range() {
    let provider = Arc::new(MockProvider::with_candles(daily_candles()));
    let service = service_with(provider.clone());
    let future = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let (start, end) = service.fetch_range(TimeFrame::Weekly, Some(future));
    assert_eq!(end, now());
    assert_eq!(start, now() - Duration::weeks(150));
}

#[tokio::test]
async fn test_resolution_error_skips_fetch() {
    let provider = Arc::new(MockProvider::with_candles(daily_candles()));
    let service = service_with(provider.clone());

    let err = service.run(request("!!!", 20, None)).await.unwrap_err();
    assert!(matches!(
        err,
        MirrorError::Resolution(ResolutionError::UnrecognizedFormat(_))
    ));

    let err = service.run(request("   ", 20, None)).await.unwrap_err();
    assert!(matches!(err, MirrorError::Resolution(ResolutionError::EmptyInput)));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_lookback_out_of_range_skips_fetch() {
    let provider = Arc::new(MockProvider::with_candles(daily_candles()));
    let service = service_with(provider.clone());

    let err = service.run(request("AAPL", 61, None)).await.unwrap_err();
    assert!(matches!(
        err,
        MirrorError::Projection(ProjectionError::LookbackOutOfRange { value: 61, .. })
    ));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_provider_failure_is_data_unavailable() {
    let provider = Arc::new(MockProvider::failing(MarketError::Network(
        "connection reset".to_string(),
    )));
    let service = service_with(provider);

    let err = service.run(request("AAPL", 20, None)).await.unwrap_err();
    match err {
        MirrorError::DataUnavailable { symbol, source } => {
            assert_eq!(symbol.as_str(), "AAPL");
            assert_eq!(source, MarketError::Network("connection reset".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_and_short_series_are_reported() {
    let service = service_with(Arc::new(MockProvider::with_candles(Vec::new())));
    let err = service.run(request("AAPL", 20, None)).await.unwrap_err();
    assert!(matches!(err, MirrorError::Projection(ProjectionError::EmptySeries)));

    let short: Vec<_> = daily_candles().into_iter().take(15).collect();
    let service = service_with(Arc::new(MockProvider::with_candles(short)));
    let err = service.run(request("AAPL", 20, None)).await.unwrap_err();
    assert!(matches!(
        err,
        MirrorError::Projection(ProjectionError::InsufficientHistory {
            required: 20,
            available: 15
        })
    ));
}

#[tokio::test]
async fn test_concurrent_queries_share_service() {
    let provider = Arc::new(MockProvider::with_candles(daily_candles()));
    let service = Arc::new(service_with(provider.clone()));

    let handles: Vec<_> = ["AAPL", "2330", "波克夏"]
        .into_iter()
        .map(|q| {
            let service = service.clone();
            tokio::spawn(async move { service.run(request(q, 30, None)).await })
        })
        .collect();

    for handle in handles {
        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.projection.projected_series.len(), 30);
    }
    assert_eq!(provider.calls().len(), 3);
}
