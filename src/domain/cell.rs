// ==========================================
// 燃料月报汇总 - 单元格值
// ==========================================
// 职责: 表格单元格的统一表示（空 / 数值 / 文本 / 日期）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Date(_) => false,
        }
    }

    /// 数值视图（文本按数字解析，允许千分位逗号）
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            CellValue::Text(s) => parse_number_text(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// 由可能为 NaN 的计算结果构造
    pub fn from_stat(value: f64) -> Self {
        if value.is_nan() {
            CellValue::Empty
        } else {
            CellValue::Number(value)
        }
    }

    pub fn from_opt_text(value: Option<String>) -> Self {
        match value {
            Some(s) => CellValue::Text(s),
            None => CellValue::Empty,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::from_stat(value)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map(CellValue::from_stat).unwrap_or(CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

fn parse_number_text(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // 科学计数法（1.2e3）由 f64 解析直接支持；inf/NaN 文本不算数值
    s.replace(',', "").parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_f64_number_and_text() {
        assert_eq!(CellValue::Number(1.5).as_f64(), Some(1.5));
        assert_eq!(CellValue::Text(" 1,234.5 ".to_string()).as_f64(), Some(1234.5));
        assert_eq!(CellValue::Text("合计".to_string()).as_f64(), None);
        assert_eq!(CellValue::Text("1.2e3".to_string()).as_f64(), Some(1200.0));
        assert_eq!(CellValue::Text("-5E-1".to_string()).as_f64(), Some(-0.5));
        assert_eq!(CellValue::Text("inf".to_string()).as_f64(), None);
        assert_eq!(CellValue::Text("NaN".to_string()).as_f64(), None);
        assert_eq!(CellValue::Empty.as_f64(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn test_from_stat_nan_is_empty() {
        assert_eq!(CellValue::from_stat(f64::NAN), CellValue::Empty);
        assert_eq!(CellValue::from_stat(2.0), CellValue::Number(2.0));
    }

    #[test]
    fn test_is_empty_blank_text() {
        assert!(CellValue::Text("   ".to_string()).is_empty());
        assert!(!CellValue::Text("A".to_string()).is_empty());
    }
}
