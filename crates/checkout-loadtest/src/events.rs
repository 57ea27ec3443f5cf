//! 结构化事件流
//!
//! 引擎核心不直接格式化任何文本，只向注入的事件接收器发出类型化
//! 事件。默认实现把事件映射到 tracing 结构化日志；测试可注入
//! NullSink 保持输出安静。

use tracing::{info, warn};

/// 运行期事件
#[derive(Debug, Clone)]
pub enum RunnerEvent {
    IterationStarted {
        scenario: String,
        vu: u32,
        iteration: u32,
    },
    /// 步骤完成一次传输调用（无论逻辑成败）
    StepCompleted {
        scenario: String,
        vu: u32,
        iteration: u32,
        step: String,
        status: u16,
        elapsed_ms: u64,
    },
    /// 步骤失败；fatal 为 true 时当前迭代随之中止
    StepFailed {
        scenario: String,
        vu: u32,
        iteration: u32,
        step: String,
        code: &'static str,
        reason: String,
        fatal: bool,
    },
    CheckRecorded {
        scenario: String,
        name: String,
        passed: bool,
    },
    IterationCompleted {
        scenario: String,
        vu: u32,
        iteration: u32,
    },
    IterationAborted {
        scenario: String,
        vu: u32,
        iteration: u32,
        step: String,
        reason: String,
    },
}

/// 事件接收器
///
/// 注入点：展示、导出与落盘都发生在该接口的实现方，不在引擎内。
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &RunnerEvent);
}

/// 默认接收器：映射到 tracing 结构化日志
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &RunnerEvent) {
        match event {
            RunnerEvent::IterationStarted {
                scenario,
                vu,
                iteration,
            } => {
                info!(scenario, vu, iteration, "迭代开始");
            }
            RunnerEvent::StepCompleted {
                scenario,
                vu,
                iteration,
                step,
                status,
                elapsed_ms,
            } => {
                info!(scenario, vu, iteration, step, status, elapsed_ms, "步骤完成");
            }
            RunnerEvent::StepFailed {
                scenario,
                vu,
                iteration,
                step,
                code,
                reason,
                fatal,
            } => {
                warn!(scenario, vu, iteration, step, code, reason, fatal, "步骤失败");
            }
            RunnerEvent::CheckRecorded {
                scenario,
                name,
                passed,
            } => {
                if *passed {
                    info!(scenario, name, "检查通过");
                } else {
                    warn!(scenario, name, "检查未通过");
                }
            }
            RunnerEvent::IterationCompleted {
                scenario,
                vu,
                iteration,
            } => {
                info!(scenario, vu, iteration, "迭代完成");
            }
            RunnerEvent::IterationAborted {
                scenario,
                vu,
                iteration,
                step,
                reason,
            } => {
                warn!(scenario, vu, iteration, step, reason, "迭代中止");
            }
        }
    }
}

/// 丢弃全部事件的接收器，测试用
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &RunnerEvent) {}
}
