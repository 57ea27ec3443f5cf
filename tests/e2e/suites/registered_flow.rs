//! 注册用户下单场景端到端测试

use checkout_loadtest::registered_checkout;
use mock_storefront::FaultConfig;

use crate::helpers::{runner_against, spawn_storefront};

#[tokio::test]
async fn test_registered_checkout_happy_path() {
    let storefront = spawn_storefront(FaultConfig::default()).await;
    let (runner, config) = runner_against(&storefront.base_url, 2, 2);

    let scenario = registered_checkout(&config);
    let stats = runner.run(&scenario).await;

    assert_eq!(stats.iterations_completed, 4);
    assert_eq!(stats.iterations_aborted, 0);

    let snapshot = runner.recorder().snapshot();
    assert_eq!(snapshot.total_failures(), 0);

    // 每次迭代登录一次、创建一个购物车
    assert_eq!(storefront.state.hits("sign_in"), 4);
    assert_eq!(storefront.state.cart_count(), 4);
    assert_eq!(storefront.state.hits("set_payment_method"), 4);
}

#[tokio::test]
async fn test_registered_checks_use_auth_prefix() {
    let storefront = spawn_storefront(FaultConfig::default()).await;
    let (runner, config) = runner_against(&storefront.base_url, 1, 1);

    let scenario = registered_checkout(&config);
    runner.run(&scenario).await;

    let snapshot = runner.recorder().snapshot();
    let by_name = snapshot
        .scenarios
        .get("registered_customer_checkout")
        .expect("场景检查缺失");

    assert!(by_name.contains_key("[AUTH] Sign in - status 200"));
    assert!(by_name.contains_key("[AUTH] Create cart - response time < 800ms"));
    assert!(by_name.contains_key("[AUTH] product is in stock"));
    // 注册场景没有访客邮箱步骤
    assert!(!by_name.keys().any(|name| name.contains("guest email")));
}
