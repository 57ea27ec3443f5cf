//! 压测 CLI 入口点
//!
//! 加载配置、应用命令行覆盖、构建运行器并输出文本报告。
//! 存在任何失败（中止的迭代或未通过的检查）时以非零码退出。

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use checkout_loadtest::cli::{Cli, ScenarioChoice};
use checkout_loadtest::{
    CheckRecorder, HttpTransport, LoadTestConfig, Scenario, ScenarioRunner, TracingSink,
    anonymous_checkout, registered_checkout,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 初始化 tracing 日志
    // 优先使用环境变量 RUST_LOG，否则使用命令行参数指定的级别
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .init();

    let mut config = LoadTestConfig::load(cli.config.as_deref())?;
    if let Some(vus) = cli.vus {
        config.execution.virtual_users = vus;
    }
    if let Some(iterations) = cli.iterations {
        config.execution.iterations_per_user = iterations;
    }

    let scenarios: Vec<Scenario> = match cli.scenario {
        ScenarioChoice::Registered => vec![registered_checkout(&config)],
        ScenarioChoice::Anonymous => vec![anonymous_checkout(&config)],
        ScenarioChoice::All => vec![registered_checkout(&config), anonymous_checkout(&config)],
    };

    info!(
        base_url = %config.target.base_url,
        virtual_users = config.execution.virtual_users,
        iterations_per_user = config.execution.iterations_per_user,
        scenarios = scenarios.len(),
        "压测开始"
    );

    let transport = HttpTransport::new(
        &config.target.base_url,
        Duration::from_secs(config.target.request_timeout_seconds),
    )?;
    let runner = ScenarioRunner::new(
        Arc::new(transport),
        Arc::new(CheckRecorder::new()),
        Arc::new(TracingSink),
        config.execution.clone(),
    );

    let report = runner.run_all(&scenarios).await;
    println!("{}", report.render_text());

    if report.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
