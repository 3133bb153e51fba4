// ==========================================
// 燃料月报汇总 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 按字段类型强制转换 / 日期解析
// 说明: 无法转换的值置空（对应 errors='coerce' 口径），不阻断导入
// ==========================================

use crate::domain::{CellValue, ColumnKind};
use chrono::{NaiveDate, NaiveDateTime};

/// 接受的日期文本格式
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub struct DataCleaner;

impl DataCleaner {
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 标准化 NULL 值（空字符串/空白 → None）
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 按字段类型转换单元格
    pub fn coerce(&self, cell: &CellValue, kind: ColumnKind) -> CellValue {
        if cell.is_empty() {
            return CellValue::Empty;
        }
        match kind {
            ColumnKind::Integer => cell
                .as_f64()
                .map(|n| CellValue::Number(n.round()))
                .unwrap_or(CellValue::Empty),
            ColumnKind::Number => cell.as_f64().map(CellValue::Number).unwrap_or(CellValue::Empty),
            ColumnKind::Text => CellValue::from_opt_text(self.normalize_null(Some(cell.to_string()))),
            ColumnKind::Date => self.parse_date(cell).map(CellValue::Date).unwrap_or(CellValue::Empty),
        }
    }

    /// 解析日期：Excel 日期单元格或常见日期文本
    pub fn parse_date(&self, cell: &CellValue) -> Option<NaiveDate> {
        match cell {
            CellValue::Date(d) => Some(*d),
            CellValue::Text(s) => self.parse_date_text(s),
            _ => None,
        }
    }

    pub fn parse_date_text(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date())
            })
    }
}
