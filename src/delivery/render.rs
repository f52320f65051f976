//! # 记录渲染
//!
//! 把规范化记录渲染为各种投递形式。
//!
//! ## 支持格式
//! - HTML 表格（剪贴板 `text/html`）
//! - 制表符分隔文本（剪贴板纯文本）
//! - JSON（远端接收方）
//! - CSV
//! - 终端表格（`tabled`）
//!
//! 列顺序固定为 `Record::COLUMNS`，`id` 在最前。
//!
//! ## 依赖关系
//! - 被 `delivery/`, `commands/` 使用
//! - 使用 `models/record.rs`

use crate::error::Result;
use crate::models::record::{format_amount, Record};

use std::io::Write;
use tabled::{Table, Tabled};

/// 终端显示行
#[derive(Debug, Clone, Tabled)]
struct RecordRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "序号")]
    seq: String,
    #[tabled(rename = "摘要")]
    summary: String,
    #[tabled(rename = "费用类型")]
    expense_type: String,
    #[tabled(rename = "明细费用类型")]
    detail_type: String,
    #[tabled(rename = "借方科目")]
    debit_account: String,
    #[tabled(rename = "金额")]
    amount: String,
}

/// 渲染为 HTML 表格，空输入返回空串
pub fn tabularize(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut html = String::from("<table border=\"0\"><tr>");
    for column in Record::COLUMNS {
        html.push_str("<th>");
        html.push_str(&escape_html(column));
        html.push_str("</th>");
    }
    html.push_str("</tr>");

    for record in records {
        html.push_str("<tr>");
        for value in record.values() {
            html.push_str("<td>");
            html.push_str(&escape_html(&value));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }

    html.push_str("</table>");
    html
}

/// 渲染为制表符分隔文本：字段以 `\t` 连接，记录以 `\n` 连接
pub fn flatten(records: &[Record]) -> String {
    records
        .iter()
        .map(|r| r.values().join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 渲染为 JSON 数组
pub fn to_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// 写出带表头的 CSV
pub fn write_csv<W: Write>(records: &[Record], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(Record::COLUMNS)?;
    for record in records {
        wtr.write_record(record.values())?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// 渲染为终端表格
pub fn terminal_table(records: &[Record]) -> String {
    let rows: Vec<RecordRow> = records
        .iter()
        .map(|r| RecordRow {
            id: r.id.clone(),
            seq: r.seq.clone(),
            summary: r.summary.clone(),
            expense_type: r.expense_type.clone(),
            detail_type: r.detail_type.clone(),
            debit_account: r.debit_account.clone(),
            amount: format_amount(r.amount),
        })
        .collect();
    Table::new(&rows).to_string()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
