//! 场景定义
//!
//! 场景是一个具名的有序步骤列表。两条内置场景（注册用户下单、
//! 匿名下单）共享同一段下单尾部，只在开头的鉴权步骤上分叉。

use std::sync::Arc;

use crate::config::LoadTestConfig;
use crate::step::Step;
use crate::steps::{
    AddToCart, AuthMode, CreateCart, FindProduct, SetBillingAddress, SetGuestEmail,
    SetPaymentMethod, SetShippingAddress, SetShippingMethod, SignIn,
};

/// 一个具名的有序步骤列表
///
/// 步骤以 Arc 持有，场景可以被克隆后分发给多个虚拟用户并发执行。
#[derive(Clone)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<Arc<dyn Step>>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, steps: Vec<Arc<dyn Step>>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }
}

/// 注册用户下单场景
///
/// 登录 -> 建购物车 -> 选品 -> 加购 -> 账单地址 -> 配送地址 ->
/// 配送方式 -> 支付方式
pub fn registered_checkout(cfg: &LoadTestConfig) -> Scenario {
    let mode = AuthMode::Registered;
    let mut steps: Vec<Arc<dyn Step>> = vec![
        Arc::new(SignIn::new(
            cfg.credentials.registered_email.clone(),
            cfg.credentials.registered_password.clone(),
            cfg.target.store.clone(),
        )),
        Arc::new(CreateCart::new(mode, cfg.target.store.clone())),
    ];
    steps.extend(checkout_tail(mode, cfg));

    Scenario::new("registered_customer_checkout", steps)
}

/// 匿名下单场景
///
/// 与注册场景共享同一段尾部，没有登录步骤，结尾补设访客邮箱。
pub fn anonymous_checkout(cfg: &LoadTestConfig) -> Scenario {
    let mode = AuthMode::Anonymous;
    let mut steps: Vec<Arc<dyn Step>> =
        vec![Arc::new(CreateCart::new(mode, cfg.target.store.clone()))];
    steps.extend(checkout_tail(mode, cfg));
    steps.push(Arc::new(SetGuestEmail::new(
        cfg.target.store.clone(),
        cfg.credentials.guest_email.clone(),
    )));

    Scenario::new("anonymous_customer_checkout", steps)
}

/// 两条场景共享的下单尾部
///
/// 步骤序列一致，地址载荷按旅程取各自的配置默认值。
fn checkout_tail(mode: AuthMode, cfg: &LoadTestConfig) -> Vec<Arc<dyn Step>> {
    let store = cfg.target.store.clone();
    let address = match mode {
        AuthMode::Registered => cfg.checkout.address.to_json(),
        AuthMode::Anonymous => cfg.checkout.guest_address.to_json(),
    };

    vec![
        Arc::new(FindProduct::new(
            mode,
            store.clone(),
            cfg.target.build_version.clone(),
            cfg.target.platform.clone(),
        )),
        Arc::new(AddToCart::new(mode, store.clone())),
        Arc::new(SetBillingAddress::new(mode, store.clone(), address.clone())),
        Arc::new(SetShippingAddress::new(mode, store.clone(), address)),
        Arc::new(SetShippingMethod::new(
            mode,
            store.clone(),
            cfg.checkout.carrier_code.clone(),
            cfg.checkout.method_code.clone(),
        )),
        Arc::new(SetPaymentMethod::new(
            mode,
            store,
            cfg.checkout.payment.to_json(),
        )),
    ]
}
