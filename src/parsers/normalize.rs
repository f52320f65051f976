//! # 行规范化
//!
//! 从表头行之后的每一行提取固定字段，生成规范化记录，并过滤无效行。
//!
//! ## 字段映射
//! - Primary: 六个表头按列下标直接取值
//! - Alternative: `用途` → `摘要`，`报销金额` → `金额`，费用类型/明细费用类型/借方科目为固定值
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/`
//! - 使用 `regex` 做金额清洗

use crate::error::{BxcopyError, Result};
use crate::models::{HeaderMatch, HeaderVocabulary, Record, Row, Table};

use regex::Regex;
use std::sync::OnceLock;

/// 差旅表的费用类型与明细费用类型
pub const TRAVEL_EXPENSE_TYPE: &str = "差旅费差旅费";
/// 差旅表的借方科目
pub const TRAVEL_DEBIT_ACCOUNT: &str = "差旅费6602.008";

fn strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9.\-]").expect("invalid amount strip regex"))
}

fn leading_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").expect("invalid leading number regex")
    })
}

/// 规范化表头之后的全部数据行
pub fn normalize(table: &Table, header: &HeaderMatch, external_id: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = table
        .rows
        .iter()
        .skip(header.row_index + 1)
        .map(|row| header.vocabulary.map_row(row, header, external_id))
        .filter(|record| !is_blank_record(record) && !is_zero_amount(record))
        .collect();

    if records.is_empty() {
        return Err(BxcopyError::NoValidData);
    }

    Ok(records)
}

impl HeaderVocabulary {
    /// 按布局把一行映射为记录
    pub(crate) fn map_row(self, row: &Row, header: &HeaderMatch, external_id: &str) -> Record {
        let field = |label: &str| -> String {
            header
                .column(label)
                .and_then(|index| row.cell_text(index))
                .unwrap_or_default()
        };

        match self {
            HeaderVocabulary::Primary => Record {
                id: external_id.to_string(),
                seq: field("序号"),
                summary: field("摘要"),
                expense_type: field("费用类型"),
                detail_type: field("明细费用类型"),
                debit_account: field("借方科目"),
                amount: coerce_amount(&field("金额")),
            },
            HeaderVocabulary::Alternative => Record {
                id: external_id.to_string(),
                seq: field("序号"),
                summary: field("用途"),
                expense_type: TRAVEL_EXPENSE_TYPE.to_string(),
                detail_type: TRAVEL_EXPENSE_TYPE.to_string(),
                debit_account: TRAVEL_DEBIT_ACCOUNT.to_string(),
                amount: coerce_amount(&field("报销金额")),
            },
        }
    }
}

/// 金额清洗：只保留数字、`.`、`-`，再解析最长的数字前缀；失败为 0
pub fn coerce_amount(text: &str) -> f64 {
    let cleaned = strip_re().replace_all(text, "");
    let value = leading_number_re()
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);

    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

/// 所有字段均为空（字符串 trim 后为空，金额为 0）
pub fn is_blank_record(record: &Record) -> bool {
    record.text_fields().iter().all(|s| s.trim().is_empty()) && record.amount == 0.0
}

/// 金额为 0
pub fn is_zero_amount(record: &Record) -> bool {
    record.amount == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::header::locate;

    fn primary_table(data: &[&[&str]]) -> Table {
        let mut rows = vec![
            Row::from_texts(&["费用明细"]),
            Row::from_texts(&["序号", "摘要", "费用类型", "明细费用类型", "借方科目", "金额"]),
        ];
        rows.extend(data.iter().map(|r| Row::from_texts(*r)));
        Table::new(rows)
    }

    fn alternative_table(data: &[&[&str]]) -> Table {
        let mut rows = vec![Row::from_texts(&[
            "序号", "日期", "出发地点", "到达地点", "用途", "报销金额",
        ])];
        rows.extend(data.iter().map(|r| Row::from_texts(*r)));
        Table::new(rows)
    }

    fn run(table: &Table, id: &str) -> Result<Vec<Record>> {
        let header = locate(table)?;
        normalize(table, &header, id)
    }

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount("¥1,234.56"), 1234.56);
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("-12.3元"), -12.3);
    }

    #[test]
    fn test_coerce_amount_takes_leading_prefix() {
        assert_eq!(coerce_amount("12.3.4"), 12.3);
        assert_eq!(coerce_amount("1-2"), 1.0);
        assert_eq!(coerce_amount(".5"), 0.5);
        assert_eq!(coerce_amount("5."), 5.0);
        assert_eq!(coerce_amount("-"), 0.0);
        assert_eq!(coerce_amount("--5"), 0.0);
        assert_eq!(coerce_amount("-0.00"), 0.0);
    }

    #[test]
    fn test_coerce_amount_ignores_non_ascii_digits() {
        // 全角数字不视为数字
        assert_eq!(coerce_amount("１２３"), 0.0);
    }

    #[test]
    fn test_coerce_amount_overflow_is_zero() {
        let huge = "9".repeat(400);
        assert_eq!(coerce_amount(&huge), 0.0);
    }

    #[test]
    fn test_primary_row() {
        let table = primary_table(&[&["1", "taxi", "travel", "travel-detail", "6602.008", "¥100.00"]]);
        let records = run(&table, "REQ-1").unwrap();
        assert_eq!(
            records,
            vec![Record {
                id: "REQ-1".to_string(),
                seq: "1".to_string(),
                summary: "taxi".to_string(),
                expense_type: "travel".to_string(),
                detail_type: "travel-detail".to_string(),
                debit_account: "6602.008".to_string(),
                amount: 100.0,
            }]
        );
    }

    #[test]
    fn test_primary_columns_follow_header_order() {
        let table = Table::new(vec![
            Row::from_texts(&["金额", "借方科目", "明细费用类型", "费用类型", "摘要", "序号"]),
            Row::from_texts(&["88", "6602.001", "办公用品", "办公费", "纸张", "3"]),
        ]);
        let records = run(&table, "").unwrap();
        assert_eq!(records[0].seq, "3");
        assert_eq!(records[0].summary, "纸张");
        assert_eq!(records[0].amount, 88.0);
        assert_eq!(records[0].id, "");
    }

    #[test]
    fn test_short_row_leaves_fields_empty() {
        let table = Table::new(vec![
            Row::from_texts(&["金额", "序号", "摘要", "费用类型", "明细费用类型", "借方科目"]),
            Row::from_texts(&["20", "7"]),
        ]);
        let records = run(&table, "REQ").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq, "7");
        assert_eq!(records[0].summary, "");
        assert_eq!(records[0].debit_account, "");
        assert_eq!(records[0].amount, 20.0);
    }

    #[test]
    fn test_alternative_row_uses_fixed_literals() {
        let table = alternative_table(&[&["2", "1/1", "A", "B", "trip", "50"]]);
        let records = run(&table, "REQ-9").unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "REQ-9");
        assert_eq!(r.seq, "2");
        assert_eq!(r.summary, "trip");
        assert_eq!(r.expense_type, "差旅费差旅费");
        assert_eq!(r.detail_type, "差旅费差旅费");
        assert_eq!(r.debit_account, "差旅费6602.008");
        assert_eq!(r.amount, 50.0);
    }

    #[test]
    fn test_alternative_literals_regardless_of_input() {
        let table = alternative_table(&[
            &["1", "", "", "", "", "12"],
            &["", "2/2", "C", "D", "差旅费6602.008", "¥7.5"],
        ]);
        let records = run(&table, "").unwrap();
        assert_eq!(records.len(), 2);
        for r in &records {
            assert_eq!(r.expense_type, TRAVEL_EXPENSE_TYPE);
            assert_eq!(r.detail_type, TRAVEL_EXPENSE_TYPE);
            assert_eq!(r.debit_account, TRAVEL_DEBIT_ACCOUNT);
        }
    }

    #[test]
    fn test_zero_amount_row_dropped() {
        let table = primary_table(&[
            &["1", "taxi", "travel", "travel-detail", "6602.008", "¥0.00"],
            &["2", "hotel", "travel", "lodging", "6602.008", "300"],
        ]);
        let records = run(&table, "REQ-1").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq, "2");
    }

    #[test]
    fn test_rows_before_header_ignored_and_order_kept() {
        let table = primary_table(&[
            &["1", "a", "", "", "", "1"],
            &[],
            &["2", "b", "", "", "", "2"],
            &["合计", "", "", "", "", "3"],
        ]);
        let records = run(&table, "").unwrap();
        let seqs: Vec<&str> = records.iter().map(|r| r.seq.as_str()).collect();
        assert_eq!(seqs, vec!["1", "2", "合计"]);
    }

    #[test]
    fn test_all_rows_invalid_is_no_valid_data() {
        let table = primary_table(&[&["1", "taxi", "travel", "travel-detail", "6602.008", "¥0.00"]]);
        assert!(matches!(run(&table, "REQ-1"), Err(BxcopyError::NoValidData)));

        let header_only = primary_table(&[]);
        assert!(matches!(run(&header_only, "REQ-1"), Err(BxcopyError::NoValidData)));
    }

    #[test]
    fn test_blank_and_zero_predicates_are_independent() {
        let blank = Record::default();
        assert!(is_blank_record(&blank));
        assert!(is_zero_amount(&blank));

        // 只有 id，金额为 0：不是空行，但金额为 0
        let id_only = Record {
            id: "REQ-1".to_string(),
            ..Record::default()
        };
        assert!(!is_blank_record(&id_only));
        assert!(is_zero_amount(&id_only));

        let whitespace = Record {
            summary: "  \t".to_string(),
            amount: 5.0,
            ..Record::default()
        };
        assert!(!is_blank_record(&whitespace));
        assert!(!is_zero_amount(&whitespace));
    }
}
