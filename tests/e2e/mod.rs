//! 下单链路压测端到端测试
//!
//! 测试覆盖完整的执行链路，包括：
//! - 注册用户下单场景
//! - 匿名下单场景
//! - 失败策略（记录后继续 vs 中止迭代）
//! - 并发执行与检查计数守恒

pub mod helpers;
pub mod suites;
