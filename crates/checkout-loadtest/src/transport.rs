//! 传输层抽象
//!
//! 通过 Transport trait 抽象 HTTP 调用，便于测试时注入 mock 实现。
//! 引擎核心只依赖该窄接口，不关心连接管理、TLS 与重试等客户端细节。

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

/// HTTP 方法
///
/// 只枚举被检查流程实际用到的方法，保持接口面最小。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

/// 一次请求的完整描述
///
/// path 为相对于 base_url 的路径；JSON 编码由传输层实现负责。
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub json_body: Option<Value>,
}

impl TransportRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            json_body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.json_body = Some(body);
        self
    }
}

/// 一次响应的结果
///
/// body 保留原始文本，JSON 解析延迟到步骤解读阶段，
/// 这样非 JSON 的错误响应也能被记录。
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub elapsed: Duration,
    pub body: String,
}

impl TransportResponse {
    /// 状态码是否为预期的 200
    pub fn status_ok(&self) -> bool {
        self.status == 200
    }

    /// 将响应体解析为 JSON
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// 传输层接口
///
/// 唯一的协作方接口：发送一个请求，返回状态码、耗时与响应体。
/// 重试策略（如需要）属于该接口的实现方，引擎不做重试。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// 基于 reqwest 的生产实现
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// 创建 HTTP 传输层
    ///
    /// base_url 末尾的斜杠会被去除，路径拼接时统一由请求方提供前导斜杠。
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("创建 HTTP 客户端失败: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.json_body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let response = builder.send().await.map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        let elapsed = start.elapsed();

        Ok(TransportResponse {
            status,
            elapsed,
            body,
        })
    }
}
