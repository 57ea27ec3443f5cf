//! 登录步骤

use serde_json::json;

use crate::context::IterationContext;
use crate::error::StepError;
use crate::step::{CheckScope, Step, StepOutcome};
use crate::transport::{TransportRequest, TransportResponse};

/// 注册用户登录
///
/// `POST /customers/token`，成功时把 `data.token` 写入上下文。
/// 提取失败本身不致命：后续第一个需要令牌的步骤会以
/// MissingContextField 中止迭代。
pub struct SignIn {
    email: String,
    password: String,
    store: String,
    name: String,
}

impl SignIn {
    pub fn new(email: String, password: String, store: String) -> Self {
        Self {
            email,
            password,
            store,
            name: "[AUTH] Sign in".to_string(),
        }
    }
}

impl Step for SignIn {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_request(&self, _ctx: &IterationContext) -> Result<TransportRequest, StepError> {
        Ok(TransportRequest::post("/customers/token")
            .with_header("store", self.store.clone())
            .with_json(json!({
                "email": self.email,
                "password": self.password,
            })))
    }

    fn interpret(
        &self,
        ctx: &mut IterationContext,
        response: &TransportResponse,
        _checks: &CheckScope<'_>,
    ) -> StepOutcome {
        let token = response
            .json()
            .ok()
            .and_then(|body| body["data"]["token"].as_str().map(str::to_string));

        match token {
            Some(token) => {
                ctx.set_auth_token(token);
                StepOutcome::Success
            }
            None => StepOutcome::fail(StepError::MalformedResponse {
                reason: format!("登录响应缺少 data.token 字段, 状态: {}", response.status),
            }),
        }
    }
}
