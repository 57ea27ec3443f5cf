//! 失败策略端到端测试
//!
//! 验证两类失败的不同处理：购物车变更失败记录后继续执行，
//! 目录/库存类前置条件失败中止当前迭代且不触达后续端点。

use checkout_loadtest::anonymous_checkout;
use mock_storefront::FaultConfig;

use crate::helpers::{runner_against, spawn_storefront};

#[tokio::test]
async fn test_shipping_address_failure_continues_iteration() {
    let storefront = spawn_storefront(FaultConfig {
        fail_shipping_address: true,
        ..Default::default()
    })
    .await;
    let (runner, config) = runner_against(&storefront.base_url, 1, 1);

    let scenario = anonymous_checkout(&config);
    let stats = runner.run(&scenario).await;

    // 配送地址返回 500，但迭代仍然完整跑完
    assert_eq!(stats.iterations_completed, 1);
    assert_eq!(stats.iterations_aborted, 0);

    let snapshot = runner.recorder().snapshot();
    let shipping = snapshot
        .counts(&scenario.name, "[ANON] Set shipping address - status 200")
        .expect("配送地址检查缺失");
    assert_eq!(shipping.failures, 1);

    // 后续步骤照常触达商城
    assert_eq!(storefront.state.hits("set_shipping_method"), 1);
    assert_eq!(storefront.state.hits("set_payment_method"), 1);
    assert_eq!(storefront.state.hits("set_guest_email"), 1);
}

#[tokio::test]
async fn test_empty_catalog_aborts_before_cart_mutations() {
    let storefront = spawn_storefront(FaultConfig {
        empty_catalog: true,
        ..Default::default()
    })
    .await;
    let (runner, config) = runner_against(&storefront.base_url, 1, 1);

    let scenario = anonymous_checkout(&config);
    let stats = runner.run(&scenario).await;

    assert_eq!(stats.iterations_completed, 0);
    assert_eq!(stats.iterations_aborted, 1);

    // 选品失败后没有任何购物车变更被执行
    assert_eq!(storefront.state.hits("create_cart"), 1);
    assert_eq!(storefront.state.hits("list_products"), 1);
    assert_eq!(storefront.state.hits("add_to_cart"), 0);
    assert_eq!(storefront.state.hits("set_billing_address"), 0);
    assert_eq!(storefront.state.hits("set_guest_email"), 0);
}

#[tokio::test]
async fn test_out_of_stock_records_failed_check_and_aborts() {
    let storefront = spawn_storefront(FaultConfig {
        out_of_stock: true,
        ..Default::default()
    })
    .await;
    let (runner, config) = runner_against(&storefront.base_url, 1, 1);

    let scenario = anonymous_checkout(&config);
    let stats = runner.run(&scenario).await;

    assert_eq!(stats.iterations_aborted, 1);

    let snapshot = runner.recorder().snapshot();
    let stock = snapshot
        .counts(&scenario.name, "[ANON] product is in stock")
        .expect("库存检查缺失");
    assert_eq!(stock.failures, 1);
    assert_eq!(storefront.state.hits("add_to_cart"), 0);
}

#[tokio::test]
async fn test_low_stock_variants_abort_iteration() {
    let storefront = spawn_storefront(FaultConfig {
        low_stock: true,
        ..Default::default()
    })
    .await;
    let (runner, config) = runner_against(&storefront.base_url, 1, 1);

    let scenario = anonymous_checkout(&config);
    let stats = runner.run(&scenario).await;

    // 所有变体库存低于阈值，选品失败即中止
    assert_eq!(stats.iterations_completed, 0);
    assert_eq!(stats.iterations_aborted, 1);
    assert_eq!(storefront.state.hits("add_to_cart"), 0);
}
