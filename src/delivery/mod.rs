//! # 投递模块
//!
//! 把提取结果送往剪贴板、远端收集服务和文件。
//! 各通道互相独立：一个通道失败不会阻止其它通道的尝试。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `models/record.rs`
//! - 子模块: render, clipboard, remote

pub mod clipboard;
pub mod remote;
pub mod render;

pub use clipboard::{ClipboardSink, CopyMode, SystemClipboard};
pub use remote::RemoteSink;

use crate::error::{BxcopyError, Channel, Result};
use crate::models::Record;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// 本次要尝试的投递通道
#[derive(Default)]
pub struct DeliveryPlan<'a> {
    pub clipboard: Option<&'a mut dyn ClipboardSink>,
    pub remote: Option<RemoteSink>,
    pub file: Option<PathBuf>,
}

/// 单个通道的成功结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivered {
    Copied(CopyMode),
    Posted { endpoint: String, status: u16 },
    Saved(PathBuf),
}

impl std::fmt::Display for Delivered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delivered::Copied(CopyMode::Rich) => write!(f, "Table copied to clipboard"),
            Delivered::Copied(CopyMode::PlainText) => write!(f, "Table copied to clipboard as plain text"),
            Delivered::Posted { endpoint, status } => write!(f, "Posted to {} (HTTP {})", endpoint, status),
            Delivered::Saved(path) => write!(f, "Saved to '{}'", path.display()),
        }
    }
}

/// 按计划依次尝试每个通道，返回各通道结果
pub fn deliver(records: &[Record], plan: DeliveryPlan<'_>) -> Vec<(Channel, Result<Delivered>)> {
    let mut outcomes = Vec::new();

    if let Some(sink) = plan.clipboard {
        let html = render::tabularize(records);
        let plain = render::flatten(records);
        let result = clipboard::copy_to(sink, &html, &plain).map(Delivered::Copied);
        outcomes.push((Channel::Clipboard, result));
    }

    if let Some(remote) = plan.remote {
        let result = remote.submit(records).map(|status| Delivered::Posted {
            endpoint: remote.endpoint().to_string(),
            status,
        });
        outcomes.push((Channel::Remote, result));
    }

    if let Some(path) = plan.file {
        let result = save_to_file(records, &path).map(|_| Delivered::Saved(path));
        outcomes.push((Channel::File, result));
    }

    outcomes
}

/// 按扩展名选择格式保存：html/htm、json、csv，其它为制表符文本
pub fn save_to_file(records: &[Record], path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    // 所有错误都归为文件通道的投递失败
    let file_err = |e: &dyn std::fmt::Display| {
        BxcopyError::delivery(Channel::File, format!("{}: {}", path.display(), e))
    };

    match ext.as_str() {
        "csv" => {
            let file = File::create(path).map_err(|e| file_err(&e))?;
            render::write_csv(records, file).map_err(|e| file_err(&e))
        }
        "json" => {
            let json = render::to_json(records).map_err(|e| file_err(&e))?;
            fs::write(path, json).map_err(|e| file_err(&e))
        }
        "html" | "htm" => fs::write(path, render::tabularize(records)).map_err(|e| file_err(&e)),
        _ => fs::write(path, render::flatten(records) + "\n").map_err(|e| file_err(&e)),
    }
}
