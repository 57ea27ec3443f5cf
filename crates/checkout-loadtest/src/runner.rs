//! 场景运行器
//!
//! 每个场景由 N 个虚拟用户并发执行，每个虚拟用户顺序完成 M 次迭代。
//! 虚拟用户之间除检查记录器外不共享任何状态；每次迭代使用全新的
//! 上下文，步骤严格按场景定义的顺序执行，不并行、不重排。

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::warn;

use crate::checks::CheckRecorder;
use crate::config::ExecutionConfig;
use crate::context::IterationContext;
use crate::events::{EventSink, RunnerEvent};
use crate::report::{ExecutionReport, ScenarioStats};
use crate::scenario::Scenario;
use crate::step::{CheckScope, Step, StepOutcome};
use crate::transport::Transport;

/// 场景运行器
pub struct ScenarioRunner {
    transport: Arc<dyn Transport>,
    recorder: Arc<CheckRecorder>,
    sink: Arc<dyn EventSink>,
    execution: ExecutionConfig,
}

/// 单次迭代的结局
enum IterationEnd {
    Completed,
    Aborted,
}

impl ScenarioRunner {
    pub fn new(
        transport: Arc<dyn Transport>,
        recorder: Arc<CheckRecorder>,
        sink: Arc<dyn EventSink>,
        execution: ExecutionConfig,
    ) -> Self {
        Self {
            transport,
            recorder,
            sink,
            execution,
        }
    }

    pub fn recorder(&self) -> &Arc<CheckRecorder> {
        &self.recorder
    }

    /// 运行单个场景：并发铺开虚拟用户，等待全部收尾后汇总
    pub async fn run(&self, scenario: &Scenario) -> ScenarioStats {
        let mut tasks = JoinSet::new();

        for vu in 1..=self.execution.virtual_users {
            let scenario = scenario.clone();
            let transport = Arc::clone(&self.transport);
            let recorder = Arc::clone(&self.recorder);
            let sink = Arc::clone(&self.sink);
            let execution = self.execution.clone();

            tasks.spawn(async move {
                let mut completed = 0u64;
                let mut aborted = 0u64;

                for iteration in 0..execution.iterations_per_user {
                    let end = run_iteration(
                        &scenario, vu, iteration, &*transport, &recorder, &*sink, &execution,
                    )
                    .await;

                    match end {
                        IterationEnd::Completed => completed += 1,
                        IterationEnd::Aborted => aborted += 1,
                    }

                    // 原脚本每次迭代后固定间歇
                    if execution.settle_seconds > 0 {
                        tokio::time::sleep(Duration::from_secs(execution.settle_seconds)).await;
                    }
                }

                (completed, aborted)
            });
        }

        let mut stats = ScenarioStats::new(&scenario.name);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((completed, aborted)) => {
                    stats.iterations_completed += completed;
                    stats.iterations_aborted += aborted;
                }
                // 虚拟用户任务异常退出（panic 或取消）：
                // 该用户的全部迭代计为中止，不让失败凭空消失
                Err(error) => {
                    warn!(scenario = %scenario.name, error = %error, "虚拟用户任务异常退出");
                    stats.iterations_aborted += u64::from(self.execution.iterations_per_user);
                }
            }
        }
        stats
    }

    /// 顺序运行多个场景，返回统一报告
    pub async fn run_all(&self, scenarios: &[Scenario]) -> ExecutionReport {
        let mut all_stats = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            all_stats.push(self.run(scenario).await);
        }

        ExecutionReport::new(all_stats, self.recorder.snapshot())
    }
}

/// 执行一次完整迭代
///
/// 中止规则：构造请求失败一律中止；传输失败仅当步骤声明
/// abort_on_transport_failure 时中止；解读结果按 fatal 标记中止。
/// 非致命失败仅记录，后续步骤照常执行。
async fn run_iteration(
    scenario: &Scenario,
    vu: u32,
    iteration: u32,
    transport: &dyn Transport,
    recorder: &CheckRecorder,
    sink: &dyn EventSink,
    execution: &ExecutionConfig,
) -> IterationEnd {
    let mut ctx = IterationContext::new(vu, iteration);
    let checks = CheckScope::new(recorder, sink, &scenario.name);

    sink.emit(&RunnerEvent::IterationStarted {
        scenario: scenario.name.clone(),
        vu,
        iteration,
    });

    for step in &scenario.steps {
        let request = match step.build_request(&ctx) {
            Ok(request) => request,
            Err(error) => {
                // 构造阶段只会因缺失前置条件失败，必然中止
                sink.emit(&RunnerEvent::StepFailed {
                    scenario: scenario.name.clone(),
                    vu,
                    iteration,
                    step: step.name().to_string(),
                    code: error.code(),
                    reason: error.to_string(),
                    fatal: true,
                });
                sink.emit(&RunnerEvent::IterationAborted {
                    scenario: scenario.name.clone(),
                    vu,
                    iteration,
                    step: step.name().to_string(),
                    reason: error.to_string(),
                });
                return IterationEnd::Aborted;
            }
        };

        let response = match transport.send(request).await {
            Ok(response) => response,
            Err(error) => {
                // 传输失败时状态与延迟两条检查都记为失败
                checks.record(format!("{} - status 200", step.name()), false);
                checks.record(
                    format!(
                        "{} - response time < {}ms",
                        step.name(),
                        execution.latency_budget_ms
                    ),
                    false,
                );

                let fatal = step.abort_on_transport_failure();
                sink.emit(&RunnerEvent::StepFailed {
                    scenario: scenario.name.clone(),
                    vu,
                    iteration,
                    step: step.name().to_string(),
                    code: "TRANSPORT_ERROR",
                    reason: error.to_string(),
                    fatal,
                });

                if fatal {
                    sink.emit(&RunnerEvent::IterationAborted {
                        scenario: scenario.name.clone(),
                        vu,
                        iteration,
                        step: step.name().to_string(),
                        reason: error.to_string(),
                    });
                    return IterationEnd::Aborted;
                }
                continue;
            }
        };

        checks.record_status_and_latency(
            step.name(),
            response.status_ok(),
            response.elapsed,
            execution.latency_budget_ms,
        );
        sink.emit(&RunnerEvent::StepCompleted {
            scenario: scenario.name.clone(),
            vu,
            iteration,
            step: step.name().to_string(),
            status: response.status,
            elapsed_ms: response.elapsed.as_millis() as u64,
        });

        match step.interpret(&mut ctx, &response, &checks) {
            StepOutcome::Success => {}
            StepOutcome::Failed { error, fatal } => {
                sink.emit(&RunnerEvent::StepFailed {
                    scenario: scenario.name.clone(),
                    vu,
                    iteration,
                    step: step.name().to_string(),
                    code: error.code(),
                    reason: error.to_string(),
                    fatal,
                });

                if fatal {
                    sink.emit(&RunnerEvent::IterationAborted {
                        scenario: scenario.name.clone(),
                        vu,
                        iteration,
                        step: step.name().to_string(),
                        reason: error.to_string(),
                    });
                    return IterationEnd::Aborted;
                }
            }
        }
    }

    sink.emit(&RunnerEvent::IterationCompleted {
        scenario: scenario.name.clone(),
        vu,
        iteration,
    });
    IterationEnd::Completed
}
