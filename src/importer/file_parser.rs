// ==========================================
// 燃料月报汇总 - 文件解析器实现
// ==========================================
// 职责: 读取 Excel 首个工作表为绝对坐标网格，划分前导行/表头/数据/合计行
// 支持: Excel (.xlsx/.xls)
// ==========================================

use crate::domain::CellValue;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, DataType, Range as CalamineRange, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::ops::Range;
use std::path::Path;

/// 受支持的扩展名
pub const EXCEL_EXTENSIONS: &[&str] = &["xls", "xlsx"];

// ==========================================
// RawSheet - 原始工作表
// ==========================================
// 行列均为绝对坐标（从 A1 起），不因首行/首列为空而偏移
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// 工作表高度（到最后一个已用行）
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// 工作表宽度（到最后一个已用列）
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// 首行以下的行数（与“读取后总行数”的口径一致）
    pub fn raw_row_count(&self) -> usize {
        self.height().saturating_sub(1)
    }

    pub fn row(&self, idx: usize) -> &[CellValue] {
        self.rows.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

// ==========================================
// SheetLayout - 固定版式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    /// 表头之前的前导行数
    pub preamble_rows: usize,
    /// 末尾合计行数
    pub trailer_rows: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            preamble_rows: 2,
            trailer_rows: 1,
        }
    }
}

impl SheetLayout {
    /// 表头所在行
    pub fn header_row(&self) -> usize {
        self.preamble_rows
    }

    /// 数据行范围；版式不完整时为空
    pub fn data_rows(&self, sheet: &RawSheet) -> Range<usize> {
        let start = self.preamble_rows + 1;
        let end = sheet.height().saturating_sub(self.trailer_rows);
        if end <= start {
            start..start
        } else {
            start..end
        }
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 读取首个工作表
    pub fn parse_first_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if !is_excel_file(path) {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string();
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件（按内容自动识别 xls / xlsx）
        let mut workbook = open_workbook_auto(path)?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::EmptyWorkbook(path.display().to_string()))??;

        Ok(to_raw_sheet(&range))
    }

    /// 读取全部工作表（按工作簿中的顺序）
    pub fn parse_all_sheets(&self, path: &Path) -> ImportResult<Vec<(String, RawSheet)>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;
        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name)?;
            sheets.push((name, to_raw_sheet(&range)));
        }
        Ok(sheets)
    }
}

/// calamine Range → 绝对坐标网格
fn to_raw_sheet(range: &CalamineRange<Data>) -> RawSheet {
    let (end_row, end_col) = match range.end() {
        Some(end) => end,
        None => return RawSheet::default(),
    };

    let rows = (0..=end_row)
        .map(|r| {
            (0..=end_col)
                .map(|c| {
                    range
                        .get_value((r, c))
                        .map(convert_cell)
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect();

    RawSheet { rows }
}

/// 扩展名是否为受支持的 Excel 格式（大小写不敏感）
pub fn is_excel_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| EXCEL_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// calamine 单元格 → CellValue
pub fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(_) => data
            .as_datetime()
            .map(|dt| CellValue::Date(dt.date()))
            .unwrap_or(CellValue::Empty),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .map(CellValue::Date)
            .unwrap_or_else(|_| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        #[allow(unreachable_patterns)]
        _ => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with_height(height: usize) -> RawSheet {
        RawSheet::from_rows(
            (0..height)
                .map(|i| vec![CellValue::Number(i as f64)])
                .collect(),
        )
    }

    #[test]
    fn test_layout_data_rows() {
        let layout = SheetLayout::default();
        // 2 前导行 + 表头 + 2 数据行 + 合计行
        let sheet = sheet_with_height(6);
        assert_eq!(layout.data_rows(&sheet), 3..5);
        assert_eq!(sheet.raw_row_count(), 5);
        assert_eq!(layout.data_rows(&sheet).len(), sheet.raw_row_count() - 3);
    }

    #[test]
    fn test_layout_short_sheet_is_empty() {
        let layout = SheetLayout::default();
        for height in 0..=4 {
            assert!(layout.data_rows(&sheet_with_height(height)).is_empty());
        }
    }

    #[test]
    fn test_is_excel_file_case_insensitive() {
        assert!(is_excel_file(Path::new("a/2024-03.XLS")));
        assert!(is_excel_file(Path::new("b.xlsx")));
        assert!(!is_excel_file(Path::new("c.csv")));
        assert!(!is_excel_file(Path::new("noext")));
    }

    #[test]
    fn test_convert_cell_basic() {
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(convert_cell(&Data::String("  ".to_string())), CellValue::Empty);
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-01-05T00:00:00".to_string())),
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
    }

    #[test]
    fn test_parser_file_not_found() {
        let parser = ExcelParser;
        let result = parser.parse_first_sheet(Path::new("non_existent.xlsx"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_parser_rejects_csv() {
        let temp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let parser = ExcelParser;
        let result = parser.parse_first_sheet(temp.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
