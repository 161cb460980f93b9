use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use kagami_core::common::TimeFrame;
use std::path::PathBuf;

/// 台股 / 海外股票镜像投影工具
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 配置文件路径，文件不存在时使用默认值
    #[arg(long, global = true, default_value = "kagami.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// 启动 HTTP API 服务 (默认)
    Serve,
    /// 执行一次镜像投影并以 JSON 输出结果
    Project {
        /// 代码或中文名称，例如 2330、台積電、AAPL
        query: String,
        /// 回看天数 (10..=60)，默认取配置
        #[arg(long)]
        lookback: Option<usize>,
        /// 周期 daily / weekly / monthly，默认取配置
        #[arg(long)]
        timeframe: Option<TimeFrame>,
        /// 回测截止日 (YYYY-MM-DD)
        #[arg(long)]
        backtest: Option<NaiveDate>,
    },
    /// 只解析代码，不抓取行情
    Resolve {
        query: String,
    },
}
