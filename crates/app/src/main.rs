mod cli;
mod settings;

use std::sync::Arc;

use clap::Parser;
use kagami_api::server::{AppState, start_server};
use kagami_core::common::time::RealTimeProvider;
use kagami_core::common::tls::install_crypto_provider;
use kagami_core::config::AppConfig;
use kagami_feed::yahoo::YahooProvider;
use kagami_manager::mirror::{MirrorRequest, MirrorService};
use kagami_symbol::{AliasTable, SymbolResolver};
use tracing::info;

use crate::cli::{Cli, Command};

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 MirrorService。
///
/// # Logic
/// 1. 解析命令行，加载并校验配置。
/// 2. 初始化全局日志。
/// 3. 按子命令分派：`resolve` 不需要行情源；`project` 与 `serve` 构造完整服务。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 命令行与配置
    let cli = Cli::parse();
    let config = settings::load_config(&cli.config)?;
    config.validate()?;

    // 2. 初始化日志
    let _guard = settings::init_logging(&config.log)?;
    info!("Kagami starting with config [{}]", cli.config.display());

    // 3. 代码解析器 (内置别名表 + 配置附加别名)
    let resolver = Arc::new(SymbolResolver::new(
        AliasTable::builtin().with_extra(config.aliases.clone()),
    ));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Resolve { query } => {
            let resolution = resolver.resolve_detailed(&query)?;
            if resolution.is_substituted() {
                eprintln!("[{}] -> [{}]", resolution.input, resolution.symbol);
            }
            println!("{}", resolution.symbol);
        }
        Command::Project {
            query,
            lookback,
            timeframe,
            backtest,
        } => {
            let service = build_service(&config, resolver)?;
            let request = MirrorRequest {
                query,
                lookback_days: lookback.unwrap_or(config.projection.default_lookback_days),
                time_frame: timeframe.unwrap_or(config.projection.default_time_frame),
                backtest_date: backtest,
            };
            let report = service.run(request).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Serve => {
            let bind_addr = format!("{}:{}", config.server.host, config.server.port);
            let service = build_service(&config, resolver)?;
            let state = AppState {
                service,
                config: Arc::new(config),
            };
            start_server(state, &bind_addr).await?;
            info!("Shutdown complete. Exiting...");
        }
    }

    Ok(())
}

/// 组装行情源、时钟与解析器 (App 层知道具体实现，Manager 不知道)
fn build_service(
    config: &AppConfig,
    resolver: Arc<SymbolResolver>,
) -> Result<Arc<MirrorService>, Box<dyn std::error::Error>> {
    install_crypto_provider();
    let feed = Arc::new(YahooProvider::new(&config.feed)?);
    Ok(Arc::new(MirrorService::new(
        feed,
        resolver,
        Arc::new(RealTimeProvider),
    )))
}
