//! 下单链路压测引擎
//!
//! 以脚本化的多步骤工作流模拟真实用户的下单行为：
//! 注册用户与匿名用户两条场景，各由 N 个并发虚拟用户驱动，
//! 每个虚拟用户顺序执行 M 次迭代。每个步骤记录状态码与延迟
//! 两条检查，失败策略区分"记录后继续"与"中止当前迭代"。

pub mod checks;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod listing;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod selector;
pub mod step;
pub mod steps;
pub mod transport;

pub use checks::{CheckRecorder, CheckSnapshot};
pub use config::LoadTestConfig;
pub use context::IterationContext;
pub use error::{SelectionError, StepError, TransportError};
pub use events::{EventSink, NullSink, RunnerEvent, TracingSink};
pub use report::{ExecutionReport, ScenarioStats};
pub use runner::ScenarioRunner;
pub use scenario::{Scenario, anonymous_checkout, registered_checkout};
pub use step::{Step, StepOutcome};
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
