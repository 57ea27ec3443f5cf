//! 检查结果记录器
//!
//! 以场景名为键的追加式日志，支持多个虚拟用户并发写入且不丢记录。
//! 所有检查均为建议性质：记录失败不会中止迭代，中止与否由步骤结果
//! 的 fatal 标记决定。读取方只拿到快照，不会影响写入方。

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// 默认响应延迟预算（毫秒）
pub const DEFAULT_LATENCY_BUDGET_MS: u64 = 800;

/// 一条检查结果，记录后不可变
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub observed_at: DateTime<Utc>,
}

/// 检查记录器
///
/// DashMap 保证并发追加安全；每个场景一条追加式日志，
/// 不存在跨虚拟用户的读改写。
#[derive(Debug, Default)]
pub struct CheckRecorder {
    entries: DashMap<String, Vec<CheckResult>>,
}

impl CheckRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条具名检查
    pub fn record(&self, scenario: &str, name: impl Into<String>, passed: bool) {
        let result = CheckResult {
            name: name.into(),
            passed,
            observed_at: Utc::now(),
        };
        self.entries
            .entry(scenario.to_string())
            .or_default()
            .push(result);
    }

    /// 已记录的检查总数
    pub fn total_recorded(&self) -> u64 {
        self.entries.iter().map(|e| e.value().len() as u64).sum()
    }

    /// 生成只读快照：按场景、按检查名聚合通过/失败计数
    pub fn snapshot(&self) -> CheckSnapshot {
        let mut scenarios: BTreeMap<String, BTreeMap<String, CheckCounts>> = BTreeMap::new();

        for entry in self.entries.iter() {
            let by_name = scenarios.entry(entry.key().clone()).or_default();
            for result in entry.value() {
                let counts = by_name.entry(result.name.clone()).or_default();
                if result.passed {
                    counts.passes += 1;
                } else {
                    counts.failures += 1;
                }
            }
        }

        CheckSnapshot { scenarios }
    }
}

/// 单个检查名的通过/失败计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckCounts {
    pub passes: u64,
    pub failures: u64,
}

impl CheckCounts {
    pub fn total(&self) -> u64 {
        self.passes + self.failures
    }
}

/// 检查记录的只读快照
#[derive(Debug, Clone, Default)]
pub struct CheckSnapshot {
    pub scenarios: BTreeMap<String, BTreeMap<String, CheckCounts>>,
}

impl CheckSnapshot {
    pub fn counts(&self, scenario: &str, name: &str) -> Option<CheckCounts> {
        self.scenarios.get(scenario)?.get(name).copied()
    }

    pub fn total_checks(&self) -> u64 {
        self.scenarios
            .values()
            .flat_map(|by_name| by_name.values())
            .map(CheckCounts::total)
            .sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.scenarios
            .values()
            .flat_map(|by_name| by_name.values())
            .map(|c| c.failures)
            .sum()
    }
}
