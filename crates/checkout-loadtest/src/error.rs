//! 统一错误类型
//!
//! 按照规约区分三类失败：传输层错误（非致命，仅记录）、前置条件错误
//! （致命，中止当前迭代）、断言失败（非致命，仅记录）。
//! 延迟超预算只体现为失败的检查项，不属于错误类型。

use thiserror::Error;

/// 传输层错误
///
/// 覆盖连接失败、超时等 HTTP 客户端层面的问题。
/// 非 2xx 状态码不是传输层错误，由各步骤自行判定。
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("请求发送失败: {0}")]
    Request(String),

    #[error("请求超时")]
    Timeout,

    #[error("响应体读取失败: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// 商品选择错误
///
/// 全部为前置条件错误：没有可购买的商品就没有继续下单的意义，
/// 因此一律致命。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("商品列表为空")]
    EmptyListing,

    #[error("首个商品无库存: sku={sku}, 状态={status}")]
    OutOfStock { sku: String, status: String },

    #[error("商品 {sku} 没有库存充足的变体")]
    NoStockedVariant { sku: String },
}

/// 步骤执行错误
#[derive(Debug, Error)]
pub enum StepError {
    #[error("传输层错误: {0}")]
    Transport(#[from] TransportError),

    #[error("商品选择失败: {0}")]
    Selection(#[from] SelectionError),

    #[error("缺少上下文字段: {field}")]
    MissingContextField { field: &'static str },

    #[error("响应格式不符合预期: {reason}")]
    MalformedResponse { reason: String },

    #[error("检查未通过: {reason}")]
    CheckFailed { reason: String },
}

impl StepError {
    /// 获取错误码，用于结构化日志与报告聚合
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Selection(SelectionError::EmptyListing) => "EMPTY_LISTING",
            Self::Selection(SelectionError::OutOfStock { .. }) => "OUT_OF_STOCK",
            Self::Selection(SelectionError::NoStockedVariant { .. }) => "NO_STOCKED_VARIANT",
            Self::MissingContextField { .. } => "MISSING_CONTEXT_FIELD",
            Self::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            Self::CheckFailed { .. } => "CHECK_FAILED",
        }
    }

    /// 是否为致命错误（中止当前迭代）
    ///
    /// 前置条件错误一律致命；传输层错误和断言失败默认只记录，
    /// 由具体步骤决定是否升级为致命（如商品发现步骤）。
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Selection(_) | Self::MissingContextField { .. })
    }
}
