//! # 远端投递
//!
//! 把记录序列化为 JSON 数组，POST 到本地收集服务。
//! 非 2xx 状态视为投递失败。
//!
//! ## 依赖关系
//! - 被 `delivery/mod.rs` 使用
//! - 使用 `reqwest` 阻塞客户端

use crate::error::{BxcopyError, Channel, Result};
use crate::models::Record;

use reqwest::blocking::Client;
use std::time::Duration;

/// 默认收集服务地址
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8765/records";

/// 远端接收方
#[derive(Debug, Clone)]
pub struct RemoteSink {
    endpoint: String,
    timeout: Duration,
}

impl RemoteSink {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        RemoteSink {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 提交记录，返回 HTTP 状态码
    pub fn submit(&self, records: &[Record]) -> Result<u16> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| BxcopyError::delivery(Channel::Remote, e))?;

        let response = client
            .post(&self.endpoint)
            .json(records)
            .send()
            .map_err(|e| {
                let reason = if e.is_connect() {
                    format!("cannot connect to {}", self.endpoint)
                } else if e.is_timeout() {
                    format!("timed out after {}s", self.timeout.as_secs())
                } else {
                    e.to_string()
                };
                BxcopyError::delivery(Channel::Remote, reason)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BxcopyError::delivery(
                Channel::Remote,
                if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    format!("HTTP {}: {}", status, body.trim())
                },
            ));
        }

        Ok(status.as_u16())
    }
}
