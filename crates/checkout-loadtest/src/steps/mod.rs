//! 下单流程的具体步骤
//!
//! 注册与匿名两条用户旅程共享同一套步骤实现，仅通过 AuthMode
//! 参数区分鉴权方式，消除两条近似代码路径各自漂移的风险。

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;

pub use auth::SignIn;
pub use cart::{AddToCart, CreateCart};
pub use catalog::FindProduct;
pub use checkout::{
    SetBillingAddress, SetGuestEmail, SetPaymentMethod, SetShippingAddress, SetShippingMethod,
};

use crate::context::IterationContext;
use crate::error::StepError;
use crate::step::StepOutcome;
use crate::transport::TransportResponse;

/// 鉴权模式
///
/// Registered 模式的每个请求都携带 Bearer 令牌；令牌须已由登录步骤
/// 写入上下文，缺失即致命。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Registered,
    Anonymous,
}

impl AuthMode {
    pub fn is_registered(self) -> bool {
        matches!(self, Self::Registered)
    }

    /// 检查命名沿用原有看板的前缀约定
    pub fn tag(self) -> &'static str {
        match self {
            Self::Registered => "[AUTH]",
            Self::Anonymous => "[ANON]",
        }
    }
}

/// 构造公共请求头：store 必带，注册模式追加 Bearer 令牌
pub(crate) fn base_headers(
    store: &str,
    mode: AuthMode,
    ctx: &IterationContext,
) -> Result<Vec<(String, String)>, StepError> {
    let mut headers = vec![("store".to_string(), store.to_string())];
    if mode.is_registered() {
        let token = ctx.require_auth_token()?;
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    }
    Ok(headers)
}

/// 购物车变更类步骤的通用判定：非 200 记录为失败检查，但不中止迭代
pub(crate) fn expect_status_ok(step_name: &str, response: &TransportResponse) -> StepOutcome {
    if response.status_ok() {
        StepOutcome::Success
    } else {
        StepOutcome::fail(StepError::CheckFailed {
            reason: format!("{step_name} 返回非 200 状态: {}", response.status),
        })
    }
}
