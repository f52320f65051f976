//! # inspect 子命令 CLI 定义
//!
//! 只定位表头，用于判断页面是否为已知布局
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use super::SelectorArgs;
use clap::Args;

/// inspect 子命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Page to read: a file path, '-' for stdin, or an http(s) URL
    #[arg(default_value = "-")]
    pub input: String,

    #[command(flatten)]
    pub selectors: SelectorArgs,

    /// Timeout in seconds for fetching URL input
    #[arg(long, env = "BXCOPY_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,
}
