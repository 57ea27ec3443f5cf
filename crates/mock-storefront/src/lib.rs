//! Mock 商城服务
//!
//! 模拟压测目标商城 API 的 crate，用于开发与端到端测试。
//! 覆盖登录、购物车、商品目录与下单设置等端点，响应形状与
//! 线上接口一致；通过 FaultConfig 注入目录异常或接口故障。

pub mod catalog;
pub mod routes;
pub mod state;

pub use routes::app;
pub use state::{CartItem, CartRecord, FaultConfig, StorefrontState};
