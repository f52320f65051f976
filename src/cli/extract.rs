//! # extract 子命令 CLI 定义
//!
//! 从单个页面提取报销记录并投递
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use super::SelectorArgs;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 标准输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PrintFormat {
    /// Human-readable terminal table
    Table,
    /// Tab-separated lines (clipboard plain text)
    Tsv,
    /// HTML table (clipboard rich text)
    Html,
    /// JSON array
    Json,
    /// CSV with header row
    Csv,
    /// Print nothing
    None,
}

impl std::fmt::Display for PrintFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrintFormat::Table => write!(f, "table"),
            PrintFormat::Tsv => write!(f, "tsv"),
            PrintFormat::Html => write!(f, "html"),
            PrintFormat::Json => write!(f, "json"),
            PrintFormat::Csv => write!(f, "csv"),
            PrintFormat::None => write!(f, "none"),
        }
    }
}

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Page to read: a file path, '-' for stdin, or an http(s) URL
    #[arg(default_value = "-")]
    pub input: String,

    #[command(flatten)]
    pub selectors: SelectorArgs,

    /// Format of the records printed to stdout
    #[arg(short, long, value_enum, default_value_t = PrintFormat::Table)]
    pub format: PrintFormat,

    /// Also save records to a file (.html, .json, .csv, otherwise tab-separated)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not write to the system clipboard
    #[arg(long, default_value_t = false)]
    pub no_clipboard: bool,

    /// Seconds to keep serving the clipboard after copying (Linux only; 0 = exit at once)
    #[arg(long, env = "BXCOPY_CLIPBOARD_HOLD", default_value_t = 30)]
    pub clipboard_hold: u64,

    /// POST the records as JSON to the collector endpoint
    #[arg(long, default_value_t = false)]
    pub post: bool,

    /// Collector endpoint used with --post
    #[arg(long, env = "BXCOPY_ENDPOINT", default_value = crate::delivery::remote::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Timeout in seconds for network requests
    #[arg(long, env = "BXCOPY_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,
}
