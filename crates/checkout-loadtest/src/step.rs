//! 步骤抽象
//!
//! 每个步骤拆成两个同步阶段：按当前上下文构造请求、解读响应并更新
//! 上下文。传输调用、状态码与延迟检查的统一记录都由运行器负责，
//! 这样判定逻辑归引擎所有，单个步骤无法遗漏，步骤本身也无需异步。

use std::time::Duration;

use crate::checks::CheckRecorder;
use crate::context::IterationContext;
use crate::error::StepError;
use crate::events::{EventSink, RunnerEvent};
use crate::transport::{TransportRequest, TransportResponse};

/// 步骤执行结果
#[derive(Debug)]
pub enum StepOutcome {
    Success,
    Failed { error: StepError, fatal: bool },
}

impl StepOutcome {
    /// 失败，致命与否由错误类型决定（前置条件错误一律致命）
    pub fn fail(error: StepError) -> Self {
        let fatal = error.is_fatal();
        Self::Failed { error, fatal }
    }

    /// 无条件致命的失败
    pub fn fail_fatal(error: StepError) -> Self {
        Self::Failed { error, fatal: true }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Failed { fatal: true, .. })
    }
}

/// 检查记录作用域
///
/// 把记录器、事件接收器与场景名绑定在一起，是一次迭代内记录检查的
/// 唯一入口：每条检查在落入记录器的同时发出 CheckRecorded 事件，
/// 两者数量恒等。
pub struct CheckScope<'a> {
    recorder: &'a CheckRecorder,
    sink: &'a dyn EventSink,
    scenario: &'a str,
}

impl<'a> CheckScope<'a> {
    pub fn new(recorder: &'a CheckRecorder, sink: &'a dyn EventSink, scenario: &'a str) -> Self {
        Self {
            recorder,
            sink,
            scenario,
        }
    }

    /// 记录一条具名检查并发出对应事件
    pub fn record(&self, name: impl Into<String>, passed: bool) {
        let name = name.into();
        self.recorder.record(self.scenario, name.as_str(), passed);
        self.sink.emit(&RunnerEvent::CheckRecorded {
            scenario: self.scenario.to_string(),
            name,
            passed,
        });
    }

    /// 记录状态码与延迟两条独立检查
    ///
    /// 命名与原有看板保持一致："{step} - status 200" 与
    /// "{step} - response time < {budget}ms"。两条都是建议性检查，
    /// 延迟判定为严格小于。
    pub fn record_status_and_latency(
        &self,
        step: &str,
        status_ok: bool,
        elapsed: Duration,
        budget_ms: u64,
    ) {
        self.record(format!("{step} - status 200"), status_ok);
        self.record(
            format!("{step} - response time < {budget_ms}ms"),
            (elapsed.as_millis() as u64) < budget_ms,
        );
    }
}

/// 一个具名步骤
pub trait Step: Send + Sync {
    /// 步骤名，也是检查命名的前缀
    fn name(&self) -> &str;

    /// 按当前上下文构造请求
    ///
    /// 读取尚未建立的上下文字段会在这里失败，并且必然致命。
    fn build_request(&self, ctx: &IterationContext) -> Result<TransportRequest, StepError>;

    /// 解读响应、更新上下文
    ///
    /// 状态码与延迟检查在进入本方法前已由运行器记录；
    /// 这里只负责步骤自身的成功判定与状态提取。
    fn interpret(
        &self,
        ctx: &mut IterationContext,
        response: &TransportResponse,
        checks: &CheckScope<'_>,
    ) -> StepOutcome;

    /// 传输层失败时是否中止当前迭代
    ///
    /// 默认只记录失败继续执行；商品发现步骤覆写为 true，
    /// 保证购物车变更类步骤不会在目录不可用时被执行。
    fn abort_on_transport_failure(&self) -> bool {
        false
    }
}
