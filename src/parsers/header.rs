//! # 表头定位
//!
//! 自上而下扫描表格行，找到第一行其单元格文本集合包含某个已知词表的全部表头。
//! 同一行先检查 Primary，再检查 Alternative。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `commands/inspect.rs` 使用
//! - 使用 `models/`

use crate::error::{BxcopyError, Result};
use crate::models::{HeaderMatch, HeaderVocabulary, Table};
use std::collections::HashMap;

/// 定位表头行
pub fn locate(table: &Table) -> Result<HeaderMatch> {
    for (row_index, row) in table.rows.iter().enumerate() {
        let texts = row.cell_texts();

        let matched = HeaderVocabulary::ALL
            .into_iter()
            .find(|vocabulary| vocabulary.is_satisfied_by(&texts));

        if let Some(vocabulary) = matched {
            return Ok(HeaderMatch {
                row_index,
                columns: column_map(texts),
                vocabulary,
            });
        }
    }

    Err(BxcopyError::HeaderNotFound)
}

/// 表头文本 → 列下标，后出现的重复表头覆盖前者
fn column_map(texts: Vec<String>) -> HashMap<String, usize> {
    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| (text, index))
        .collect()
}
