//! 迭代上下文
//!
//! 每个虚拟用户的每次迭代独占一份可变状态，步骤之间通过它传递
//! 令牌、购物车 ID 与选中的 SKU。字段全部为私有 Option，步骤必须
//! 通过 require_* 访问器取值，字段缺失即为致命的前置条件错误。
//! 上下文在迭代结束时丢弃，绝不跨迭代或跨虚拟用户共享。

use crate::error::StepError;

/// 单次迭代的可变状态
#[derive(Debug, Default)]
pub struct IterationContext {
    /// 虚拟用户编号，仅用于日志关联
    pub vu: u32,
    /// 该虚拟用户内的迭代序号
    pub iteration: u32,

    auth_token: Option<String>,
    cart_id: Option<String>,
    parent_sku: Option<String>,
    variant_sku: Option<String>,
    guest_email: Option<String>,
}

impl IterationContext {
    pub fn new(vu: u32, iteration: u32) -> Self {
        Self {
            vu,
            iteration,
            ..Self::default()
        }
    }

    pub fn set_auth_token(&mut self, token: String) {
        self.auth_token = Some(token);
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn require_auth_token(&self) -> Result<&str, StepError> {
        self.auth_token
            .as_deref()
            .ok_or(StepError::MissingContextField { field: "auth_token" })
    }

    /// 设置购物车 ID
    ///
    /// 不变式：一旦设置，在迭代剩余时间内不可变更。
    pub fn set_cart_id(&mut self, cart_id: String) {
        debug_assert!(self.cart_id.is_none(), "cart_id 在一次迭代内只能设置一次");
        self.cart_id = Some(cart_id);
    }

    pub fn require_cart_id(&self) -> Result<&str, StepError> {
        self.cart_id
            .as_deref()
            .ok_or(StepError::MissingContextField { field: "cart_id" })
    }

    /// 记录商品选择结果
    ///
    /// 不变式：由商品发现步骤设置且仅设置一次，先于所有引用 SKU 的步骤。
    pub fn set_skus(&mut self, parent_sku: String, variant_sku: String) {
        debug_assert!(
            self.parent_sku.is_none() && self.variant_sku.is_none(),
            "SKU 在一次迭代内只能设置一次"
        );
        self.parent_sku = Some(parent_sku);
        self.variant_sku = Some(variant_sku);
    }

    pub fn require_skus(&self) -> Result<(&str, &str), StepError> {
        let parent = self
            .parent_sku
            .as_deref()
            .ok_or(StepError::MissingContextField { field: "parent_sku" })?;
        let variant = self
            .variant_sku
            .as_deref()
            .ok_or(StepError::MissingContextField {
                field: "variant_sku",
            })?;
        Ok((parent, variant))
    }

    pub fn set_guest_email(&mut self, email: String) {
        self.guest_email = Some(email);
    }

    pub fn guest_email(&self) -> Option<&str> {
        self.guest_email.as_deref()
    }
}
