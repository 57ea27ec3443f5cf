//! 内存状态
//!
//! 购物车与命中计数都放在 DashMap 里，支持压测场景下的并发访问。
//! FaultConfig 用于在测试中人为制造目录异常或接口故障。

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// 购物车条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub parent_sku: String,
    pub sku: String,
    pub quantity: u32,
}

/// 一个购物车的完整状态
#[derive(Debug, Clone, Default, Serialize)]
pub struct CartRecord {
    pub items: Vec<CartItem>,
    pub billing_address_set: bool,
    pub shipping_address_set: bool,
    pub shipping_method: Option<String>,
    pub payment_method: Option<String>,
    pub guest_email: Option<String>,
}

/// 故障注入配置
///
/// 全部默认关闭；打开后对应端点表现为异常，
/// 用于验证压测引擎的失败策略。
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultConfig {
    /// 商品目录返回空列表
    pub empty_catalog: bool,
    /// 首个商品标记为无库存
    pub out_of_stock: bool,
    /// 所有变体库存量低于选择阈值
    pub low_stock: bool,
    /// 设置配送地址接口返回 500
    pub fail_shipping_address: bool,
}

/// 共享服务状态
#[derive(Clone, Default)]
pub struct StorefrontState {
    pub faults: FaultConfig,
    carts: Arc<DashMap<String, CartRecord>>,
    hits: Arc<DashMap<String, u64>>,
}

impl StorefrontState {
    pub fn new(faults: FaultConfig) -> Self {
        Self {
            faults,
            ..Self::default()
        }
    }

    /// 创建新购物车，返回其 ID
    pub fn create_cart(&self) -> String {
        let cart_id = uuid::Uuid::new_v4().to_string();
        self.carts.insert(cart_id.clone(), CartRecord::default());
        cart_id
    }

    pub fn cart(&self, cart_id: &str) -> Option<CartRecord> {
        self.carts.get(cart_id).map(|c| c.clone())
    }

    /// 修改已存在的购物车；购物车不存在时返回 false
    pub fn with_cart(&self, cart_id: &str, f: impl FnOnce(&mut CartRecord)) -> bool {
        match self.carts.get_mut(cart_id) {
            Some(mut cart) => {
                f(&mut cart);
                true
            }
            None => false,
        }
    }

    pub fn cart_count(&self) -> usize {
        self.carts.len()
    }

    /// 记录一次端点命中
    pub fn record_hit(&self, endpoint: &str) {
        *self.hits.entry(endpoint.to_string()).or_insert(0) += 1;
    }

    pub fn hits(&self, endpoint: &str) -> u64 {
        self.hits.get(endpoint).map(|h| *h).unwrap_or(0)
    }
}
