//! 结算步骤：地址、配送、支付与访客邮箱
//!
//! 这组步骤全部是购物车变更：非 200 状态记录为失败检查后流程继续，
//! 这一不对称（目录/库存失败中止、变更失败继续）是从源行为延续的
//! 明确设计决策。

use serde_json::{Value, json};

use super::{AuthMode, base_headers, expect_status_ok};
use crate::context::IterationContext;
use crate::error::StepError;
use crate::step::{CheckScope, Step, StepOutcome};
use crate::transport::{TransportRequest, TransportResponse};

/// 设置账单地址
///
/// `POST /cart/{cartId}/set_billing_address`，useForShipping 固定 false，
/// 配送地址由后续步骤单独设置。
pub struct SetBillingAddress {
    mode: AuthMode,
    store: String,
    address: Value,
    name: String,
}

impl SetBillingAddress {
    pub fn new(mode: AuthMode, store: String, address: Value) -> Self {
        Self {
            mode,
            store,
            address,
            name: format!("{} Set billing address", mode.tag()),
        }
    }
}

impl Step for SetBillingAddress {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_request(&self, ctx: &IterationContext) -> Result<TransportRequest, StepError> {
        let cart_id = ctx.require_cart_id()?;
        Ok(
            TransportRequest::post(format!("/cart/{cart_id}/set_billing_address"))
                .with_headers(base_headers(&self.store, self.mode, ctx)?)
                .with_json(json!({
                    "address": self.address,
                    "useForShipping": false,
                })),
        )
    }

    fn interpret(
        &self,
        _ctx: &mut IterationContext,
        response: &TransportResponse,
        _checks: &CheckScope<'_>,
    ) -> StepOutcome {
        expect_status_ok(&self.name, response)
    }
}

/// 设置配送地址
///
/// `POST /cart/{cartId}/set_shipping_address`
pub struct SetShippingAddress {
    mode: AuthMode,
    store: String,
    address: Value,
    name: String,
}

impl SetShippingAddress {
    pub fn new(mode: AuthMode, store: String, address: Value) -> Self {
        Self {
            mode,
            store,
            address,
            name: format!("{} Set shipping address", mode.tag()),
        }
    }
}

impl Step for SetShippingAddress {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_request(&self, ctx: &IterationContext) -> Result<TransportRequest, StepError> {
        let cart_id = ctx.require_cart_id()?;
        Ok(
            TransportRequest::post(format!("/cart/{cart_id}/set_shipping_address"))
                .with_headers(base_headers(&self.store, self.mode, ctx)?)
                .with_json(json!({ "address": self.address })),
        )
    }

    fn interpret(
        &self,
        _ctx: &mut IterationContext,
        response: &TransportResponse,
        _checks: &CheckScope<'_>,
    ) -> StepOutcome {
        expect_status_ok(&self.name, response)
    }
}

/// 设置配送方式
///
/// `POST /cart/{cartId}/set_shipping_method`
pub struct SetShippingMethod {
    mode: AuthMode,
    store: String,
    carrier_code: String,
    method_code: String,
    name: String,
}

impl SetShippingMethod {
    pub fn new(mode: AuthMode, store: String, carrier_code: String, method_code: String) -> Self {
        Self {
            mode,
            store,
            carrier_code,
            method_code,
            name: format!("{} Set shipping method", mode.tag()),
        }
    }
}

impl Step for SetShippingMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_request(&self, ctx: &IterationContext) -> Result<TransportRequest, StepError> {
        let cart_id = ctx.require_cart_id()?;
        Ok(
            TransportRequest::post(format!("/cart/{cart_id}/set_shipping_method"))
                .with_headers(base_headers(&self.store, self.mode, ctx)?)
                .with_json(json!({
                    "carrierCode": self.carrier_code,
                    "methodCode": self.method_code,
                })),
        )
    }

    fn interpret(
        &self,
        _ctx: &mut IterationContext,
        response: &TransportResponse,
        _checks: &CheckScope<'_>,
    ) -> StepOutcome {
        expect_status_ok(&self.name, response)
    }
}

/// 设置支付方式
///
/// `POST /cart/{cartId}/set_payment_method`，载荷形状由配置给出。
pub struct SetPaymentMethod {
    mode: AuthMode,
    store: String,
    payment: Value,
    name: String,
}

impl SetPaymentMethod {
    pub fn new(mode: AuthMode, store: String, payment: Value) -> Self {
        Self {
            mode,
            store,
            payment,
            name: format!("{} Set payment method", mode.tag()),
        }
    }
}

impl Step for SetPaymentMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_request(&self, ctx: &IterationContext) -> Result<TransportRequest, StepError> {
        let cart_id = ctx.require_cart_id()?;
        Ok(
            TransportRequest::post(format!("/cart/{cart_id}/set_payment_method"))
                .with_headers(base_headers(&self.store, self.mode, ctx)?)
                .with_json(self.payment.clone()),
        )
    }

    fn interpret(
        &self,
        _ctx: &mut IterationContext,
        response: &TransportResponse,
        _checks: &CheckScope<'_>,
    ) -> StepOutcome {
        expect_status_ok(&self.name, response)
    }
}

/// 设置访客邮箱（仅匿名流程）
///
/// `POST /cart/{cartId}/set_guest_email`
pub struct SetGuestEmail {
    store: String,
    email: String,
    name: String,
}

impl SetGuestEmail {
    pub fn new(store: String, email: String) -> Self {
        Self {
            store,
            email,
            name: format!("{} Set guest email", AuthMode::Anonymous.tag()),
        }
    }
}

impl Step for SetGuestEmail {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_request(&self, ctx: &IterationContext) -> Result<TransportRequest, StepError> {
        let cart_id = ctx.require_cart_id()?;
        Ok(
            TransportRequest::post(format!("/cart/{cart_id}/set_guest_email"))
                .with_headers(base_headers(&self.store, AuthMode::Anonymous, ctx)?)
                .with_json(json!({ "email": self.email })),
        )
    }

    fn interpret(
        &self,
        ctx: &mut IterationContext,
        response: &TransportResponse,
        _checks: &CheckScope<'_>,
    ) -> StepOutcome {
        if response.status_ok() {
            ctx.set_guest_email(self.email.clone());
        }
        expect_status_ok(&self.name, response)
    }
}
