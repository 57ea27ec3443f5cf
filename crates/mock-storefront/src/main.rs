//! Mock 商城服务入口点

use clap::Parser;
use tracing::info;

use mock_storefront::{FaultConfig, StorefrontState, app};

/// Mock 商城服务
///
/// 启动模拟商城 HTTP 服务，可通过开关注入目录异常或接口故障。
#[derive(Parser, Debug)]
#[command(name = "mock-storefront")]
#[command(version, about = "模拟商城 API 服务")]
struct Cli {
    /// 服务端口
    #[arg(short, long, default_value = "8090")]
    port: u16,

    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// 商品目录返回空列表
    #[arg(long)]
    empty_catalog: bool,

    /// 首个商品标记为无库存
    #[arg(long)]
    out_of_stock: bool,

    /// 所有变体库存量低于选择阈值
    #[arg(long)]
    low_stock: bool,

    /// 设置配送地址接口返回 500
    #[arg(long)]
    fail_shipping_address: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .init();

    let faults = FaultConfig {
        empty_catalog: cli.empty_catalog,
        out_of_stock: cli.out_of_stock,
        low_stock: cli.low_stock,
        fail_shipping_address: cli.fail_shipping_address,
    };
    let state = StorefrontState::new(faults);

    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Mock 商城服务启动");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
