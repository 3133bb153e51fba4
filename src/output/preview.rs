// ==========================================
// 燃料月报汇总 - 工作簿预览
// ==========================================
// 职责: 读回已生成的工作簿，每个工作表渲染为 {name, headers, rows} 字符串表
// 渲染规则:
// - 数值: 千分位 + 两位小数（#,##0.00）
// - 序号列: 整数字符串
// - 日期: YYYY-MM-DD
// - 空值: 空字符串
// ==========================================

use crate::domain::{field, CellValue};
use crate::importer::ExcelParser;
use crate::output::error::{OutputError, OutputResult};
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPreview {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn preview_workbook(path: &Path) -> OutputResult<Vec<SheetPreview>> {
    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(OutputError::NotFound(path_str));
    }

    let sheets = ExcelParser
        .parse_all_sheets(path)
        .map_err(|e| OutputError::read(&path_str, e))?;

    Ok(sheets
        .into_iter()
        .map(|(name, sheet)| {
            let height = sheet.height();
            let headers: Vec<String> = if height > 0 {
                sheet.row(0).iter().map(|c| c.to_string()).collect()
            } else {
                Vec::new()
            };
            let seq_col = headers.iter().position(|h| h == field::SEQ);

            let rows = (1..height)
                .map(|r| {
                    (0..headers.len())
                        .map(|c| render_cell(sheet.cell(r, c), Some(c) == seq_col))
                        .collect()
                })
                .collect();

            SheetPreview {
                name,
                headers,
                rows,
            }
        })
        .collect())
}

fn render_cell(cell: &CellValue, integer: bool) -> String {
    match cell {
        CellValue::Number(n) if integer => format!("{}", n.round() as i64),
        CellValue::Number(n) => format_number(*n, 2),
        other => other.to_string(),
    }
}

/// 千分位 + 固定小数位
pub fn format_number(n: f64, decimals: usize) -> String {
    if !n.is_finite() {
        return String::new();
    }
    let s = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    // 超出 u128 的量级不加千分位
    let mut res = match int_part.parse::<u128>() {
        Ok(int_val) => int_val.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    // -0.00 不带符号
    if n < 0.0 && res.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", res)
    } else {
        res
    }
}
