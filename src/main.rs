//! # bxcopy - 报销单表格提取工具
//!
//! 从报销单页面中找到费用明细表，规范化为统一的七字段记录，
//! 复制到剪贴板（HTML + 制表符文本），并可选提交到本地收集服务。
//!
//! ## 子命令
//! - `extract` - 从单个页面提取并投递
//! - `inspect` - 诊断页面表头布局
//! - `batch`   - 批量提取保存的页面，合并为 CSV
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (页面读取、表头定位、行规范化)
//!   │     ├── delivery/  (渲染、剪贴板、远端、文件)
//!   │     ├── batch/     (批量收集与并行执行)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod delivery;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        // 提取失败（页面形状不符/无数据）与其它错误区分退出码
        std::process::exit(if e.is_extraction_failure() { 2 } else { 1 });
    }
}
