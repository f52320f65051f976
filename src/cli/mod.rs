//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//! 所有配置项都可通过环境变量 `BXCOPY_*` 提供默认值。
//!
//! ## 命令结构
//! - `extract`: 从单个页面提取记录并投递（剪贴板/远端/文件）
//! - `inspect`: 只做表头定位，诊断页面结构
//! - `batch`: 批量提取目录下的页面，合并为 CSV
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: extract, inspect, batch

pub mod batch;
pub mod extract;
pub mod inspect;

use crate::parsers::PageSelectors;
use clap::{Args, Parser, Subcommand};

/// bxcopy - 报销单表格提取工具
#[derive(Parser)]
#[command(name = "bxcopy")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Extract expense-claim tables from web pages as normalized records", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Extract records from one page and copy them to the clipboard
    Extract(extract::ExtractArgs),

    /// Show which header row and layout a page matches
    Inspect(inspect::InspectArgs),

    /// Extract records from many saved pages into one CSV file
    Batch(batch::BatchArgs),
}

/// 页面元素定位参数（各子命令共用）
#[derive(Args, Debug, Clone)]
pub struct SelectorArgs {
    /// Element id of the claim table
    #[arg(long, env = "BXCOPY_TABLE_ID", default_value = "oTable0")]
    pub table_id: String,

    /// Element id holding the request number copied into every record
    #[arg(long, env = "BXCOPY_MARK_ID", default_value = "requestmarkSpan")]
    pub mark_id: String,
}

impl From<&SelectorArgs> for PageSelectors {
    fn from(args: &SelectorArgs) -> Self {
        PageSelectors {
            table_id: args.table_id.clone(),
            mark_id: args.mark_id.clone(),
        }
    }
}
