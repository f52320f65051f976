//! # 表格标记数据模型
//!
//! 页面表格的只读快照：`Table` → `Row` → `Node`。
//! 由 `parsers/page.rs` 从 HTML 构建，之后不再修改。
//!
//! ## 依赖关系
//! - 被 `parsers/` 使用
//! - 无外部模块依赖

/// 标记树节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// 文本叶子
    Text(String),
    /// 表单输入叶子（当前值）
    Input(String),
    /// 容器元素，子节点按文档顺序排列
    Container(Vec<Node>),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn input(value: impl Into<String>) -> Self {
        Node::Input(value.into())
    }

    pub fn container(children: Vec<Node>) -> Self {
        Node::Container(children)
    }

    /// 展平文本：叶子取 trim 后的内容，容器直接拼接子节点（不加分隔符）
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut String) {
        match self {
            Node::Text(s) | Node::Input(s) => out.push_str(s.trim()),
            Node::Container(children) => {
                for child in children {
                    child.flatten_into(out);
                }
            }
        }
    }
}

/// 表格行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Node>,
}

impl Row {
    pub fn new(cells: Vec<Node>) -> Self {
        Row { cells }
    }

    /// 纯文本单元格构成的行
    #[cfg(test)]
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Row {
            cells: texts.iter().map(|t| Node::text(t.as_ref())).collect(),
        }
    }

    /// 每个单元格的展平文本
    pub fn cell_texts(&self) -> Vec<String> {
        self.cells.iter().map(Node::flatten_text).collect()
    }

    /// 指定列的展平文本；越界时返回 None
    pub fn cell_text(&self, index: usize) -> Option<String> {
        self.cells.get(index).map(Node::flatten_text)
    }
}

/// 表格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Table { rows }
    }
}
