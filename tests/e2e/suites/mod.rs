//! 端到端测试套件

pub mod anonymous_flow;
pub mod concurrency;
pub mod failure_policy;
pub mod registered_flow;
