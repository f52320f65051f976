//! # 解析器模块
//!
//! 页面读取、表头定位与行规范化。
//!
//! ## 流程
//! ```text
//! HTML ─ page::read_page ─> Table + 申请单号
//!        header::locate   ─> HeaderMatch
//!        normalize::normalize ─> Vec<Record>
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: charset, page, header, normalize

pub mod charset;
pub mod header;
pub mod normalize;
pub mod page;

use crate::error::Result;
use crate::models::{HeaderVocabulary, Record};

/// 页面中表格与申请单号元素的 id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelectors {
    pub table_id: String,
    pub mark_id: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        PageSelectors {
            table_id: "oTable0".to_string(),
            mark_id: "requestmarkSpan".to_string(),
        }
    }
}

/// 一次提取的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub request_id: String,
    pub vocabulary: HeaderVocabulary,
    pub records: Vec<Record>,
}

/// 从 HTML 页面提取规范化记录
pub fn extract_records(html: &str, selectors: &PageSelectors) -> Result<Extraction> {
    let page = page::read_page(html, &selectors.table_id, &selectors.mark_id)?;
    let header = header::locate(&page.table)?;
    let records = normalize::normalize(&page.table, &header, &page.request_id)?;

    Ok(Extraction {
        request_id: page.request_id,
        vocabulary: header.vocabulary,
        records,
    })
}
