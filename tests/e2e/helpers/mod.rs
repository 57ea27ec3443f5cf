//! 端到端测试辅助设施
//!
//! 在进程内的随机端口上启动 mock 商城，并构建指向它的运行器。

use std::sync::Arc;
use std::time::Duration;

use checkout_loadtest::{CheckRecorder, HttpTransport, LoadTestConfig, NullSink, ScenarioRunner};
use mock_storefront::{FaultConfig, StorefrontState, app};

/// 进程内运行的 mock 商城
///
/// state 句柄用于测试结束后检查端点命中与购物车状态。
pub struct TestStorefront {
    pub base_url: String,
    pub state: StorefrontState,
}

/// 在随机端口启动 mock 商城
pub async fn spawn_storefront(faults: FaultConfig) -> TestStorefront {
    let state = StorefrontState::new(faults);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("绑定测试端口失败");
    let addr = listener.local_addr().expect("获取测试端口失败");

    let router = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock 商城退出");
    });

    TestStorefront {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// 构建指向给定商城的运行器与配置
///
/// 测试统一关闭迭代间歇，避免拖慢测试套件。
pub fn runner_against(
    base_url: &str,
    vus: u32,
    iterations: u32,
) -> (ScenarioRunner, LoadTestConfig) {
    let mut config = LoadTestConfig::default();
    config.target.base_url = base_url.to_string();
    config.execution.virtual_users = vus;
    config.execution.iterations_per_user = iterations;
    config.execution.settle_seconds = 0;

    let transport = HttpTransport::new(base_url, Duration::from_secs(5)).expect("创建传输层失败");
    let runner = ScenarioRunner::new(
        Arc::new(transport),
        Arc::new(CheckRecorder::new()),
        Arc::new(NullSink),
        config.execution.clone(),
    );

    (runner, config)
}
