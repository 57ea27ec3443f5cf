//! 购物车步骤：创建购物车与加购

use serde_json::json;

use super::{AuthMode, base_headers};
use crate::context::IterationContext;
use crate::error::StepError;
use crate::step::{CheckScope, Step, StepOutcome};
use crate::transport::{TransportRequest, TransportResponse};

/// 创建购物车
///
/// `POST /cart`，注册模式携带 Bearer 令牌，匿名模式只带 store 头。
/// 成功时 `data` 即购物车 ID；提取失败不致命，后续第一个引用
/// 购物车的步骤会以 MissingContextField 中止。
pub struct CreateCart {
    mode: AuthMode,
    store: String,
    name: String,
}

impl CreateCart {
    pub fn new(mode: AuthMode, store: String) -> Self {
        Self {
            mode,
            store,
            name: format!("{} Create cart", mode.tag()),
        }
    }
}

impl Step for CreateCart {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_request(&self, ctx: &IterationContext) -> Result<TransportRequest, StepError> {
        Ok(TransportRequest::post("/cart").with_headers(base_headers(&self.store, self.mode, ctx)?))
    }

    fn interpret(
        &self,
        ctx: &mut IterationContext,
        response: &TransportResponse,
        _checks: &CheckScope<'_>,
    ) -> StepOutcome {
        let cart_id = response.json().ok().and_then(|body| match &body["data"] {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        match cart_id {
            Some(cart_id) => {
                ctx.set_cart_id(cart_id);
                StepOutcome::Success
            }
            None => StepOutcome::fail(StepError::MalformedResponse {
                reason: format!("创建购物车响应缺少 data 字段, 状态: {}", response.status),
            }),
        }
    }
}

/// 加购
///
/// `PATCH /cart/{cartId}`。规约保留原脚本的差异：注册流程以
/// HTTP 状态码 200 判定成功，匿名流程以响应体 `status == "success"`
/// 判定。两个判定都只记录失败，不中止迭代。
pub struct AddToCart {
    mode: AuthMode,
    store: String,
    name: String,
}

impl AddToCart {
    pub fn new(mode: AuthMode, store: String) -> Self {
        Self {
            mode,
            store,
            name: format!("{} Add to cart", mode.tag()),
        }
    }
}

impl Step for AddToCart {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_request(&self, ctx: &IterationContext) -> Result<TransportRequest, StepError> {
        let cart_id = ctx.require_cart_id()?;
        let (parent_sku, variant_sku) = ctx.require_skus()?;

        Ok(TransportRequest::patch(format!("/cart/{cart_id}"))
            .with_headers(base_headers(&self.store, self.mode, ctx)?)
            .with_json(json!({
                "parentSku": parent_sku,
                "sku": variant_sku,
                "quantity": 1,
            })))
    }

    fn interpret(
        &self,
        _ctx: &mut IterationContext,
        response: &TransportResponse,
        _checks: &CheckScope<'_>,
    ) -> StepOutcome {
        match self.mode {
            AuthMode::Registered => {
                if response.status_ok() {
                    StepOutcome::Success
                } else {
                    StepOutcome::fail(StepError::CheckFailed {
                        reason: format!("加购返回非 200 状态: {}", response.status),
                    })
                }
            }
            // 匿名流程历史上以响应体 status 字段为准，保留该判定
            AuthMode::Anonymous => {
                let body_status_ok = response
                    .json()
                    .ok()
                    .and_then(|body| body["status"].as_str().map(|s| s == "success"))
                    .unwrap_or(false);

                if body_status_ok {
                    StepOutcome::Success
                } else {
                    StepOutcome::fail(StepError::CheckFailed {
                        reason: "加购响应体 status 字段不是 success".to_string(),
                    })
                }
            }
        }
    }
}
