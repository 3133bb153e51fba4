// ==========================================
// 燃料月报汇总 - 输出工作表模型
// ==========================================

use crate::domain::TidyTable;

/// 待写出的工作表：名称 + 整洁表 + 需要 "0.00" 格式的统计列
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub table: TidyTable,
    pub stat_columns: Vec<String>,
}

impl SheetData {
    pub fn new(name: impl Into<String>, table: TidyTable) -> Self {
        Self {
            name: name.into(),
            table,
            stat_columns: Vec::new(),
        }
    }

    pub fn with_stat_columns<S: Into<String>>(mut self, cols: impl IntoIterator<Item = S>) -> Self {
        self.stat_columns = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_stat_column(&self, col: &str) -> bool {
        self.stat_columns.iter().any(|c| c == col)
    }
}
