use kagami_core::config::{AppConfig, LogConfig};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// # Summary
/// 加载全局配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为最底层。
/// 2. 叠加配置文件 (可选，格式按扩展名推断)。
/// 3. 叠加 `KAGAMI__` 前缀的环境变量，例如 `KAGAMI__SERVER__PORT=9000`。
pub fn load_config(path: &Path) -> Result<AppConfig, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Config::try_from(&AppConfig::default())?)
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("KAGAMI")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// # Summary
/// 初始化全局日志。
///
/// # Logic
/// 1. `RUST_LOG` 优先，否则使用 `log.filter`。
/// 2. 终端输出写到 stderr，stdout 留给命令结果。
/// 3. 配置了 `log.dir` 时额外写入按天滚动的日志文件。
///
/// # Returns
/// 文件日志的 WorkerGuard，调用方需持有到进程结束。
pub fn init_logging(log: &LogConfig) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&log.filter)?,
    };

    let (file_layer, guard) = match &log.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "kagami.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
