//! # 页面读取器
//!
//! 使用 `scraper` 解析 HTML，按元素 id 找到表格和申请单号元素，
//! 并把表格转换为只读的 `Table` 快照。
//!
//! ## 取行/取单元格规则
//! - 行：表格下所有后代 `<tr>`
//! - 单元格：行下所有后代 `<td>`
//! - `<input>` 取其 `value` 属性；注释、doctype 不产生文本
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/markup.rs`

use crate::error::{BxcopyError, Result};
use crate::models::{Node, Row, Table};

use scraper::{ElementRef, Html};

/// 页面快照：表格和申请单号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub table: Table,
    pub request_id: String,
}

/// 读取页面快照
pub fn read_page(html: &str, table_id: &str, mark_id: &str) -> Result<PageSnapshot> {
    let doc = Html::parse_document(html);

    let table_el = find_by_id(&doc, table_id).ok_or_else(|| BxcopyError::TableNotFound {
        id: table_id.to_string(),
    })?;

    let request_id = find_by_id(&doc, mark_id)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    Ok(PageSnapshot {
        table: table_snapshot(table_el),
        request_id,
    })
}

/// 按 id 查找第一个元素
fn find_by_id<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().id() == Some(id))
}

/// 指定标签名的全部后代元素（不含自身）
fn descendants_named<'a>(el: ElementRef<'a>, name: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |e| e.value().name().eq_ignore_ascii_case(name))
}

fn table_snapshot(table_el: ElementRef<'_>) -> Table {
    let rows = descendants_named(table_el, "tr")
        .map(|tr| Row::new(descendants_named(tr, "td").map(element_node).collect()))
        .collect();
    Table::new(rows)
}

/// 元素 → 标记节点
fn element_node(el: ElementRef<'_>) -> Node {
    if el.value().name().eq_ignore_ascii_case("input") {
        return Node::input(el.value().attr("value").unwrap_or_default());
    }

    let children = el
        .children()
        .filter_map(|child| match child.value() {
            scraper::Node::Text(text) => Some(Node::text(&**text)),
            scraper::Node::Element(_) => ElementRef::wrap(child).map(element_node),
            _ => None,
        })
        .collect();

    Node::container(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div>申请单号：<span id="requestmarkSpan"> REQ-1 </span></div>
<table id="oTable0">
  <tr><td colspan="6">费用报销单</td></tr>
  <tr><td>部门</td><td><input type="text" value="财务部"></td></tr>
  <tr><td>序号</td><td>摘要</td><td>费用类型</td><td>明细费用类型</td><td>借方科目</td><td><b>金</b>额</td></tr>
  <tr><td>1</td><td><span> taxi </span></td><td>travel</td><td>travel-detail</td><td>6602.008</td><td><input value=" ¥100.00 "></td></tr>
</table>
</body></html>"#;

    #[test]
    fn test_read_page_snapshot() {
        let page = read_page(PAGE, "oTable0", "requestmarkSpan").unwrap();
        assert_eq!(page.request_id, "REQ-1");
        assert_eq!(page.table.rows.len(), 4);
        assert_eq!(page.table.rows[1].cell_texts(), vec!["部门", "财务部"]);
        assert_eq!(
            page.table.rows[2].cell_texts(),
            vec!["序号", "摘要", "费用类型", "明细费用类型", "借方科目", "金额"]
        );
        assert_eq!(page.table.rows[3].cell_text(1), Some("taxi".to_string()));
        assert_eq!(page.table.rows[3].cell_text(5), Some("¥100.00".to_string()));
    }

    #[test]
    fn test_missing_table() {
        let err = read_page("<html><body><p>nothing</p></body></html>", "oTable0", "requestmarkSpan")
            .unwrap_err();
        assert!(matches!(err, BxcopyError::TableNotFound { ref id } if id == "oTable0"));
    }

    #[test]
    fn test_missing_mark_defaults_to_empty() {
        let html = r#"<table id="t"><tr><td>a</td></tr></table>"#;
        let page = read_page(html, "t", "requestmarkSpan").unwrap();
        assert_eq!(page.request_id, "");
        assert_eq!(page.table.rows.len(), 1);
    }

    #[test]
    fn test_nested_rows_and_cells_are_included() {
        // 与 DOM getElementsByTagName 一致：嵌套表格的行也会被收集
        let html = r#"<table id="t"><tr><td>x<table><tr><td>y</td></tr></table></td></tr></table>"#;
        let page = read_page(html, "t", "m").unwrap();
        assert_eq!(page.table.rows.len(), 2);
        assert_eq!(page.table.rows[0].cell_texts(), vec!["xy", "y"]);
    }

    #[test]
    fn test_comments_contribute_nothing() {
        let html = r#"<table id="t"><tr><td>金<!-- hidden -->额</td></tr></table>"#;
        let page = read_page(html, "t", "m").unwrap();
        assert_eq!(page.table.rows[0].cell_text(0), Some("金额".to_string()));
    }
}
