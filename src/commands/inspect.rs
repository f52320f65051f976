//! # inspect 命令实现
//!
//! 只运行表头定位，打印命中的行、布局和列映射。
//! 用来区分"页面不对"（找不到表头）和"页面对但没有数据"。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `parsers/page.rs`, `parsers/header.rs`
//! - 使用 `utils/output.rs`

use crate::cli::inspect::InspectArgs;
use crate::error::Result;
use crate::models::HeaderMatch;
use crate::parsers::{header, page};
use crate::utils::output;

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    output::print_header("Inspecting page layout");

    let html = super::load_page(&args.input, args.timeout)?;
    let snapshot = page::read_page(&html, &args.selectors.table_id, &args.selectors.mark_id)?;

    output::print_field(
        "table",
        &format!("#{} ({} rows)", args.selectors.table_id, snapshot.table.rows.len()),
    );
    output::print_field(
        "request id",
        if snapshot.request_id.is_empty() {
            "(none)"
        } else {
            snapshot.request_id.as_str()
        },
    );

    let matched = header::locate(&snapshot.table)?;
    output::print_field("header row", &matched.row_index.to_string());
    output::print_field("layout", &matched.vocabulary.to_string());
    output::print_field(
        "data rows",
        &snapshot.table.rows.len().saturating_sub(matched.row_index + 1).to_string(),
    );
    output::print_separator();

    for (label, column) in required_columns(&matched) {
        output::print_field(label, &column.to_string());
    }

    Ok(())
}

/// 命中布局所需表头及其列下标，按词表顺序
fn required_columns(matched: &HeaderMatch) -> Vec<(&'static str, usize)> {
    matched
        .vocabulary
        .labels()
        .iter()
        .filter_map(|label| matched.column(label).map(|c| (*label, c)))
        .collect()
}
