//! 商品发现步骤

use super::{AuthMode, base_headers};
use crate::context::IterationContext;
use crate::error::StepError;
use crate::listing::parse_listing;
use crate::selector;
use crate::step::{CheckScope, Step, StepOutcome};
use crate::transport::{TransportRequest, TransportResponse};

/// 查找可购买商品
///
/// `GET /e-products`。这是唯一失败即中止的步骤：目录不可用、列表为
/// 空或没有库存充足的变体时，继续执行购物车变更没有意义。
/// 选择成功前还会记录一条建议性的"商品有库存"业务检查。
pub struct FindProduct {
    mode: AuthMode,
    store: String,
    build_version: String,
    platform: String,
    name: String,
    stock_check_name: String,
}

impl FindProduct {
    pub fn new(mode: AuthMode, store: String, build_version: String, platform: String) -> Self {
        Self {
            mode,
            store,
            build_version,
            platform,
            name: format!("{} Get products", mode.tag()),
            stock_check_name: format!("{} product is in stock", mode.tag()),
        }
    }
}

impl Step for FindProduct {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_request(&self, ctx: &IterationContext) -> Result<TransportRequest, StepError> {
        Ok(TransportRequest::get("/e-products")
            .with_header("fl-build-version", self.build_version.clone())
            .with_header("fl-platform", self.platform.clone())
            .with_headers(base_headers(&self.store, self.mode, ctx)?))
    }

    fn interpret(
        &self,
        ctx: &mut IterationContext,
        response: &TransportResponse,
        checks: &CheckScope<'_>,
    ) -> StepOutcome {
        if !response.status_ok() {
            return StepOutcome::fail_fatal(StepError::CheckFailed {
                reason: format!("获取商品列表返回非 200 状态: {}", response.status),
            });
        }

        let listing = match parse_listing(&response.body) {
            Ok(listing) => listing,
            Err(error) => return StepOutcome::fail_fatal(error),
        };

        // 原看板就有这条业务检查：仅在有商品可看时记录，
        // 空列表直接走选择逻辑的致命失败，不留下检查记录
        if let Some(first) = listing.items.first() {
            checks.record(
                self.stock_check_name.clone(),
                first.stock_status == crate::listing::StockStatus::InStock,
            );
        }

        match selector::select(&listing) {
            Ok(pair) => {
                ctx.set_skus(pair.parent_sku, pair.variant_sku);
                StepOutcome::Success
            }
            Err(error) => StepOutcome::fail(StepError::from(error)),
        }
    }

    fn abort_on_transport_failure(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckRecorder;
    use crate::events::NullSink;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> TransportResponse {
        TransportResponse {
            status,
            elapsed: Duration::from_millis(10),
            body: body.to_string(),
        }
    }

    fn step() -> FindProduct {
        FindProduct::new(
            AuthMode::Anonymous,
            "default".to_string(),
            "123".to_string(),
            "Android".to_string(),
        )
    }

    #[test]
    fn test_request_carries_platform_headers() {
        let req = step().build_request(&IterationContext::new(1, 0)).unwrap();

        assert_eq!(req.path, "/e-products");
        assert!(
            req.headers
                .iter()
                .any(|(k, v)| k == "fl-build-version" && v == "123")
        );
        assert!(
            req.headers
                .iter()
                .any(|(k, v)| k == "fl-platform" && v == "Android")
        );
        assert!(req.headers.iter().any(|(k, _)| k == "store"));
    }

    #[test]
    fn test_successful_selection_sets_skus() {
        let mut ctx = IterationContext::new(1, 0);
        let recorder = CheckRecorder::new();
        let checks = CheckScope::new(&recorder, &NullSink, "anonymous");

        let body = r#"{"data":{"items":[{
            "sku": "A",
            "stock_status": "IN_STOCK",
            "variants": [
                { "product": { "sku": "A1", "stock_available_qty": 10 } },
                { "product": { "sku": "A2", "stock_available_qty": 50 } }
            ]
        }]}}"#;

        let outcome = step().interpret(&mut ctx, &response(200, body), &checks);

        assert!(matches!(outcome, StepOutcome::Success));
        assert_eq!(ctx.require_skus().unwrap(), ("A", "A2"));

        let snapshot = recorder.snapshot();
        let counts = snapshot
            .counts("anonymous", "[ANON] product is in stock")
            .unwrap();
        assert_eq!(counts.passes, 1);
    }

    #[test]
    fn test_non_200_is_fatal() {
        let mut ctx = IterationContext::new(1, 0);
        let recorder = CheckRecorder::new();
        let checks = CheckScope::new(&recorder, &NullSink, "anonymous");

        let outcome = step().interpret(&mut ctx, &response(503, "unavailable"), &checks);
        assert!(outcome.is_fatal());
    }

    #[test]
    fn test_empty_listing_is_fatal() {
        let mut ctx = IterationContext::new(1, 0);
        let recorder = CheckRecorder::new();
        let checks = CheckScope::new(&recorder, &NullSink, "anonymous");

        let outcome = step().interpret(&mut ctx, &response(200, r#"{"data":{"items":[]}}"#), &checks);
        assert!(outcome.is_fatal());
        assert!(ctx.require_skus().is_err());

        // 没有商品可看时不留下库存检查记录
        assert_eq!(recorder.total_recorded(), 0);
    }

    #[test]
    fn test_out_of_stock_records_failed_check_then_aborts() {
        let mut ctx = IterationContext::new(1, 0);
        let recorder = CheckRecorder::new();
        let checks = CheckScope::new(&recorder, &NullSink, "anonymous");

        let body = r#"{"data":{"items":[{"sku":"A","stock_status":"OUT_OF_STOCK"}]}}"#;
        let outcome = step().interpret(&mut ctx, &response(200, body), &checks);

        assert!(outcome.is_fatal());
        let snapshot = recorder.snapshot();
        let counts = snapshot
            .counts("anonymous", "[ANON] product is in stock")
            .unwrap();
        assert_eq!(counts.failures, 1);
    }

    #[test]
    fn test_aborts_on_transport_failure() {
        assert!(step().abort_on_transport_failure());
    }
}
