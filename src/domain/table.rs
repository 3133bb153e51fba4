// ==========================================
// 燃料月报汇总 - 整洁表 (Tidy Table)
// ==========================================
// 职责: 有序列名 + 行数据；支持纵向合并与按列名选择
// 说明: 合并时取列名并集（按首次出现顺序），缺失单元格补空
// ==========================================

use crate::domain::cell::CellValue;
use serde::Serialize;
use thiserror::Error;

/// 列选择失败（期望列在合并表中不存在）
#[derive(Error, Debug, Clone, PartialEq)]
#[error("找不到列 '{column}'，当前可用的列名有: {available:?}")]
pub struct SchemaError {
    pub column: String,
    pub available: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TidyTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TidyTable {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 查找列，不存在时返回带可用列名的诊断
    pub fn require_column(&self, name: &str) -> Result<usize, SchemaError> {
        self.column_index(name).ok_or_else(|| SchemaError {
            column: name.to_string(),
            available: self.columns.clone(),
        })
    }

    /// 追加一行；行宽与列数不一致时按列数截断或补空
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// 追加派生列（值个数须等于行数，不足补空）
    pub fn add_column(&mut self, name: &str, mut values: Vec<CellValue>) {
        values.resize(self.rows.len(), CellValue::Empty);
        if let Some(idx) = self.column_index(name) {
            for (row, value) in self.rows.iter_mut().zip(values) {
                row[idx] = value;
            }
            return;
        }
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// 纵向合并：行顺序 = 表顺序，再按表内行顺序
    pub fn concat(tables: Vec<TidyTable>) -> TidyTable {
        let mut columns: Vec<String> = Vec::new();
        for table in &tables {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let mut merged = TidyTable::new(columns.clone());
        for table in tables {
            let mapping: Vec<Option<usize>> =
                columns.iter().map(|c| table.column_index(c)).collect();
            for mut row in table.rows {
                let out = mapping
                    .iter()
                    .map(|src| match src {
                        Some(i) => std::mem::take(&mut row[*i]),
                        None => CellValue::Empty,
                    })
                    .collect();
                merged.rows.push(out);
            }
        }
        merged
    }

    /// 按给定顺序选择列
    pub fn select(&self, names: &[&str]) -> Result<TidyTable, SchemaError> {
        let indices = names
            .iter()
            .map(|name| self.require_column(name))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(TidyTable {
            columns: names.iter().map(|s| s.to_string()).collect(),
            rows,
        })
    }
}
