//! # batch 子命令 CLI 定义
//!
//! 批量提取保存下来的页面，合并为一个 CSV 文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use super::SelectorArgs;
use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Page file or directory containing saved pages
    pub input: PathBuf,

    #[command(flatten)]
    pub selectors: SelectorArgs,

    /// Glob patterns for page files (comma separated)
    #[arg(short, long, default_value = "*.html,*.htm")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Merged CSV output file
    #[arg(short, long, default_value = "records.csv")]
    pub output: PathBuf,
}
