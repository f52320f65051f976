//! # 数据模型模块
//!
//! 定义表格快照与规范化记录的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `delivery/` 和 `commands/` 使用
//! - 子模块: markup, record

pub mod markup;
pub mod record;

pub use markup::{Node, Row, Table};
pub use record::{HeaderMatch, HeaderVocabulary, Record};
