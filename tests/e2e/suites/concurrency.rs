//! 并发执行端到端测试
//!
//! 以默认规模（50 虚拟用户 x 3 次迭代）驱动 mock 商城，
//! 验证迭代计数与检查计数在并发下守恒。

use checkout_loadtest::anonymous_checkout;
use mock_storefront::FaultConfig;

use crate::helpers::{runner_against, spawn_storefront};

#[tokio::test]
async fn test_default_scale_completes_all_iterations() {
    let storefront = spawn_storefront(FaultConfig::default()).await;
    let (runner, config) = runner_against(&storefront.base_url, 50, 3);

    let scenario = anonymous_checkout(&config);
    let stats = runner.run(&scenario).await;

    assert_eq!(stats.iterations_completed, 150);
    assert_eq!(stats.iterations_aborted, 0);

    // 每次迭代一个独立购物车，无跨虚拟用户串用
    assert_eq!(storefront.state.cart_count(), 150);

    // 检查计数守恒：8 个步骤 x 2 条检查 + 1 条库存业务检查
    let snapshot = runner.recorder().snapshot();
    assert_eq!(snapshot.total_checks(), 150 * 17);
    assert_eq!(runner.recorder().total_recorded(), 150 * 17);
}

#[tokio::test]
async fn test_run_all_keeps_scenarios_separate() {
    let storefront = spawn_storefront(FaultConfig::default()).await;
    let (runner, config) = runner_against(&storefront.base_url, 5, 2);

    let scenarios = vec![
        checkout_loadtest::registered_checkout(&config),
        anonymous_checkout(&config),
    ];
    let report = runner.run_all(&scenarios).await;

    assert_eq!(report.stats.len(), 2);
    for stats in &report.stats {
        assert_eq!(stats.iterations_completed, 10);
    }

    // 两个场景的检查分开聚合
    assert!(report.checks.scenarios.contains_key("registered_customer_checkout"));
    assert!(report.checks.scenarios.contains_key("anonymous_customer_checkout"));
    assert!(!report.has_failures());
}
