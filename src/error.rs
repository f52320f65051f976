//! # 统一错误处理模块
//!
//! 定义 bxcopy 的所有错误类型，使用 `thiserror` 派生。
//!
//! 提取错误（表格缺失、表头缺失、无有效数据）是终止性的；
//! 投递错误（剪贴板、远端、文件）按通道单独报告，不影响提取结果。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// 投递通道
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Clipboard,
    Remote,
    File,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Clipboard => write!(f, "clipboard"),
            Channel::Remote => write!(f, "remote"),
            Channel::File => write!(f, "file"),
        }
    }
}

/// bxcopy 统一错误类型
#[derive(Error, Debug)]
pub enum BxcopyError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to fetch page {url}\nReason: {reason}")]
    FetchError { url: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 提取错误
    // ─────────────────────────────────────────────────────────────
    #[error("Table element '#{id}' not found in page")]
    TableNotFound { id: String },

    #[error("No row contains a known header layout")]
    HeaderNotFound,

    #[error("Header found, but no valid data rows")]
    NoValidData,

    // ─────────────────────────────────────────────────────────────
    // 投递错误
    // ─────────────────────────────────────────────────────────────
    #[error("Delivery via {channel} failed: {reason}")]
    DeliveryFailed { channel: Channel, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl BxcopyError {
    /// 是否为提取阶段的错误（页面形状不符或无数据）
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            BxcopyError::TableNotFound { .. } | BxcopyError::HeaderNotFound | BxcopyError::NoValidData
        )
    }

    pub(crate) fn delivery(channel: Channel, reason: impl std::fmt::Display) -> Self {
        BxcopyError::DeliveryFailed {
            channel,
            reason: reason.to_string(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, BxcopyError>;
