//! 执行报告
//!
//! 运行结束后把迭代统计与检查快照汇总成一份报告，
//! 并提供面向终端的文本渲染。

use std::fmt::Write;

use crate::checks::CheckSnapshot;

/// 单个场景的迭代统计
#[derive(Debug, Clone)]
pub struct ScenarioStats {
    pub scenario: String,
    /// 跑完全部步骤的迭代数
    pub iterations_completed: u64,
    /// 因致命失败提前中止的迭代数
    pub iterations_aborted: u64,
}

impl ScenarioStats {
    pub fn new(scenario: &str) -> Self {
        Self {
            scenario: scenario.to_string(),
            iterations_completed: 0,
            iterations_aborted: 0,
        }
    }

    pub fn total_iterations(&self) -> u64 {
        self.iterations_completed + self.iterations_aborted
    }
}

/// 一次完整运行的汇总报告
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub stats: Vec<ScenarioStats>,
    pub checks: CheckSnapshot,
}

impl ExecutionReport {
    pub fn new(stats: Vec<ScenarioStats>, checks: CheckSnapshot) -> Self {
        Self { stats, checks }
    }

    /// 是否存在任何失败（中止的迭代或未通过的检查）
    pub fn has_failures(&self) -> bool {
        self.checks.total_failures() > 0 || self.stats.iter().any(|s| s.iterations_aborted > 0)
    }

    /// 渲染终端文本报告
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for stats in &self.stats {
            let _ = writeln!(
                out,
                "场景 {}: 完成 {} / 中止 {} (共 {} 次迭代)",
                stats.scenario,
                stats.iterations_completed,
                stats.iterations_aborted,
                stats.total_iterations(),
            );

            if let Some(by_name) = self.checks.scenarios.get(&stats.scenario) {
                for (name, counts) in by_name {
                    let mark = if counts.failures == 0 { "✓" } else { "✗" };
                    let _ = writeln!(
                        out,
                        "  {mark} {name}: {}/{} 通过",
                        counts.passes,
                        counts.total(),
                    );
                }
            }
        }

        let _ = writeln!(
            out,
            "检查合计: {} 条, 失败 {} 条",
            self.checks.total_checks(),
            self.checks.total_failures(),
        );

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckRecorder;

    #[test]
    fn test_report_flags_failures() {
        let recorder = CheckRecorder::new();
        recorder.record("s", "step - status 200", true);

        let mut stats = ScenarioStats::new("s");
        stats.iterations_completed = 1;

        let clean = ExecutionReport::new(vec![stats.clone()], recorder.snapshot());
        assert!(!clean.has_failures());

        recorder.record("s", "step - status 200", false);
        let failing = ExecutionReport::new(vec![stats], recorder.snapshot());
        assert!(failing.has_failures());
    }

    #[test]
    fn test_aborted_iterations_count_as_failure() {
        let recorder = CheckRecorder::new();
        let mut stats = ScenarioStats::new("s");
        stats.iterations_aborted = 1;

        let report = ExecutionReport::new(vec![stats], recorder.snapshot());
        assert!(report.has_failures());
    }

    #[test]
    fn test_render_text_lists_checks_per_scenario() {
        let recorder = CheckRecorder::new();
        recorder.record("anonymous", "Create cart - status 200", true);
        recorder.record("anonymous", "Create cart - status 200", false);

        let mut stats = ScenarioStats::new("anonymous");
        stats.iterations_completed = 2;

        let text = ExecutionReport::new(vec![stats], recorder.snapshot()).render_text();
        assert!(text.contains("场景 anonymous"));
        assert!(text.contains("Create cart - status 200: 1/2 通过"));
    }
}
