//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。
//! 运行形态（虚拟用户数、迭代次数）可在命令行覆盖配置文件取值。

use clap::{Parser, ValueEnum};

/// 下单链路压测工具
///
/// 以 N 个并发虚拟用户驱动注册/匿名两条下单场景，
/// 记录每个步骤的状态码与延迟检查并输出汇总报告。
#[derive(Parser, Debug)]
#[command(name = "checkout-loadtest")]
#[command(version, about = "电商下单链路压测工具")]
pub struct Cli {
    /// 要运行的场景
    #[arg(short, long, value_enum, default_value = "all")]
    pub scenario: ScenarioChoice,

    /// 配置文件路径（TOML，可选）
    #[arg(short, long)]
    pub config: Option<String>,

    /// 并发虚拟用户数（覆盖配置文件）
    #[arg(long)]
    pub vus: Option<u32>,

    /// 每个虚拟用户的迭代次数（覆盖配置文件）
    #[arg(long)]
    pub iterations: Option<u32>,

    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

/// 场景选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioChoice {
    /// 仅注册用户下单场景
    Registered,
    /// 仅匿名下单场景
    Anonymous,
    /// 两个场景顺序运行
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["checkout-loadtest"]);
        assert_eq!(cli.scenario, ScenarioChoice::All);
        assert!(cli.config.is_none());
        assert!(cli.vus.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "checkout-loadtest",
            "--scenario",
            "anonymous",
            "--vus",
            "10",
            "--iterations",
            "2",
            "--config",
            "loadtest.toml",
        ]);
        assert_eq!(cli.scenario, ScenarioChoice::Anonymous);
        assert_eq!(cli.vus, Some(10));
        assert_eq!(cli.iterations, Some(2));
        assert_eq!(cli.config.as_deref(), Some("loadtest.toml"));
    }
}
