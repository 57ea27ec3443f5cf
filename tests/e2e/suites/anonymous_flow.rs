//! 匿名下单场景端到端测试

use checkout_loadtest::anonymous_checkout;
use mock_storefront::FaultConfig;

use crate::helpers::{runner_against, spawn_storefront};

#[tokio::test]
async fn test_anonymous_checkout_happy_path() {
    let storefront = spawn_storefront(FaultConfig::default()).await;
    let (runner, config) = runner_against(&storefront.base_url, 2, 2);

    let scenario = anonymous_checkout(&config);
    let stats = runner.run(&scenario).await;

    assert_eq!(stats.iterations_completed, 4);
    assert_eq!(stats.iterations_aborted, 0);
    assert_eq!(runner.recorder().snapshot().total_failures(), 0);

    // 匿名流程不登录，结尾设置访客邮箱
    assert_eq!(storefront.state.hits("sign_in"), 0);
    assert_eq!(storefront.state.hits("set_guest_email"), 4);
}

#[tokio::test]
async fn test_anonymous_checks_use_anon_prefix() {
    let storefront = spawn_storefront(FaultConfig::default()).await;
    let (runner, config) = runner_against(&storefront.base_url, 1, 1);

    let scenario = anonymous_checkout(&config);
    runner.run(&scenario).await;

    let snapshot = runner.recorder().snapshot();
    let by_name = snapshot
        .scenarios
        .get("anonymous_customer_checkout")
        .expect("场景检查缺失");

    assert!(by_name.contains_key("[ANON] Create cart - status 200"));
    assert!(by_name.contains_key("[ANON] Set guest email - status 200"));
    assert!(by_name.contains_key("[ANON] product is in stock"));
    // 8 个步骤 x 2 条检查 + 1 条库存业务检查
    assert_eq!(snapshot.total_checks(), 17);
}
