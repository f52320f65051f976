//! # 报销记录数据模型
//!
//! 定义表头词表、表头定位结果与规范化后的七字段记录。
//!
//! ## 依赖关系
//! - 被 `parsers/header.rs`, `parsers/normalize.rs` 使用
//! - 被 `delivery/` 和 `commands/` 使用

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 已知的表头布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderVocabulary {
    /// 费用明细表
    Primary,
    /// 差旅明细表
    Alternative,
}

impl HeaderVocabulary {
    /// 按优先级排列：同一行两者都满足时取 Primary
    pub const ALL: [HeaderVocabulary; 2] = [HeaderVocabulary::Primary, HeaderVocabulary::Alternative];

    /// 该布局要求出现的全部表头
    pub fn labels(self) -> &'static [&'static str; 6] {
        match self {
            HeaderVocabulary::Primary => &["序号", "摘要", "费用类型", "明细费用类型", "借方科目", "金额"],
            HeaderVocabulary::Alternative => &["序号", "日期", "出发地点", "到达地点", "用途", "报销金额"],
        }
    }

    /// 行文本集合是否包含全部表头
    pub fn is_satisfied_by(self, texts: &[String]) -> bool {
        self.labels()
            .iter()
            .all(|label| texts.iter().any(|t| t == label))
    }
}

impl std::fmt::Display for HeaderVocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderVocabulary::Primary => write!(f, "primary"),
            HeaderVocabulary::Alternative => write!(f, "alternative"),
        }
    }
}

/// 表头定位结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// 表头行在表格中的下标
    pub row_index: usize,
    /// 表头文本 → 列下标（重复表头以后出现者为准）
    pub columns: HashMap<String, usize>,
    /// 命中的布局
    pub vocabulary: HeaderVocabulary,
}

impl HeaderMatch {
    pub fn column(&self, label: &str) -> Option<usize> {
        self.columns.get(label).copied()
    }
}

/// 规范化记录
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    pub id: String,

    #[serde(rename = "序号")]
    pub seq: String,

    #[serde(rename = "摘要")]
    pub summary: String,

    #[serde(rename = "费用类型")]
    pub expense_type: String,

    #[serde(rename = "明细费用类型")]
    pub detail_type: String,

    #[serde(rename = "借方科目")]
    pub debit_account: String,

    #[serde(rename = "金额")]
    pub amount: f64,
}

impl Record {
    /// 输出列顺序，`id` 始终在最前
    pub const COLUMNS: [&'static str; 7] = ["id", "序号", "摘要", "费用类型", "明细费用类型", "借方科目", "金额"];

    /// 按 `COLUMNS` 顺序输出各字段文本
    pub fn values(&self) -> [String; 7] {
        [
            self.id.clone(),
            self.seq.clone(),
            self.summary.clone(),
            self.expense_type.clone(),
            self.detail_type.clone(),
            self.debit_account.clone(),
            format_amount(self.amount),
        ]
    }

    /// 全部字符串字段
    pub fn text_fields(&self) -> [&str; 6] {
        [
            self.id.as_str(),
            self.seq.as_str(),
            self.summary.as_str(),
            self.expense_type.as_str(),
            self.detail_type.as_str(),
            self.debit_account.as_str(),
        ]
    }
}

/// 金额的最短十进制表示（100.0 → "100"）
pub fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}
