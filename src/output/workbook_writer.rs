// ==========================================
// 燃料月报汇总 - 工作簿写出
// ==========================================
// 职责: 多工作表 xlsx 写出
// 格式: 表头加粗 / 统计列 "0.00" / 日期 "yyyy-mm-dd" / NaN 与空值写为空单元格
// 原子性: 内存序列化 → 同目录唯一临时文件 → persist 覆盖目标
// ==========================================

use crate::domain::CellValue;
use crate::output::error::{OutputError, OutputResult};
use crate::output::sheet::SheetData;
use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub const STAT_NUM_FORMAT: &str = "0.00";
pub const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";

struct Formats {
    header: Format,
    stat: Format,
    date: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            stat: Format::new().set_num_format(STAT_NUM_FORMAT),
            date: Format::new().set_num_format(DATE_NUM_FORMAT),
        }
    }
}

pub struct WorkbookWriter;

impl WorkbookWriter {
    /// 写出工作簿（整体成功或整体失败）
    pub fn write(&self, path: &Path, sheets: &[SheetData]) -> OutputResult<()> {
        let path_str = path.display().to_string();

        let buffer = self
            .serialize(sheets)
            .map_err(|e| OutputError::write(&path_str, e))?;

        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(|e| OutputError::write(&path_str, e))?;
                parent.to_path_buf()
            }
            None => PathBuf::from("."),
        };

        // 临时文件名唯一；写入失败时随 drop 删除
        let mut tmp =
            NamedTempFile::new_in(&parent).map_err(|e| OutputError::write(&path_str, e))?;
        tmp.write_all(&buffer)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| OutputError::write(&path_str, e))?;
        if let Err(e) = tmp.persist(path) {
            warn!(path = %path_str, error = %e.error, "替换目标文件失败，已清理临时文件");
            return Err(OutputError::write(&path_str, e.error));
        }

        info!(
            path = %path_str,
            sheets = sheets.len(),
            bytes = buffer.len(),
            "工作簿已保存"
        );
        Ok(())
    }

    /// 在内存中生成 xlsx 字节
    pub fn serialize(&self, sheets: &[SheetData]) -> Result<Vec<u8>, XlsxError> {
        let formats = Formats::new();
        let mut workbook = Workbook::new();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;
            write_sheet(worksheet, sheet, &formats)?;
            debug!(sheet = %sheet.name, rows = sheet.table.len(), "工作表已生成");
        }

        workbook.save_to_buffer()
    }
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &SheetData,
    formats: &Formats,
) -> Result<(), XlsxError> {
    let columns = sheet.table.columns();

    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &formats.header)?;
    }

    let stat_flags: Vec<bool> = columns.iter().map(|c| sheet.is_stat_column(c)).collect();

    for (r, row) in sheet.table.rows().iter().enumerate() {
        let xl_row = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let xl_col = c as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Number(n) if n.is_nan() || n.is_infinite() => {}
                CellValue::Number(n) => {
                    if stat_flags.get(c).copied().unwrap_or(false) {
                        worksheet.write_number_with_format(xl_row, xl_col, *n, &formats.stat)?;
                    } else {
                        worksheet.write_number(xl_row, xl_col, *n)?;
                    }
                }
                CellValue::Text(s) => {
                    worksheet.write_string(xl_row, xl_col, s)?;
                }
                CellValue::Date(d) => match excel_date(d.year(), d.month(), d.day()) {
                    Some(dt) => {
                        worksheet.write_datetime_with_format(xl_row, xl_col, &dt, &formats.date)?;
                    }
                    None => {
                        worksheet.write_string(xl_row, xl_col, cell.to_string())?;
                    }
                },
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Excel 仅支持 1900 年之后的日期
fn excel_date(year: i32, month: u32, day: u32) -> Option<ExcelDateTime> {
    let year = u16::try_from(year).ok()?;
    ExcelDateTime::from_ymd(year, month as u8, day as u8).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TidyTable;
    use tempfile::TempDir;

    fn sample_sheet() -> SheetData {
        let mut table = TidyTable::new(["月份", "值"]);
        table.push_row(vec![CellValue::Text("2024-01".into()), CellValue::Number(1.5)]);
        table.push_row(vec![CellValue::Text("2024-02".into()), CellValue::Number(f64::NAN)]);
        SheetData::new("统计", table).with_stat_columns(["值"])
    }

    #[test]
    fn test_write_creates_file_and_no_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");

        WorkbookWriter.write(&path, &[sample_sheet()]).unwrap();

        assert!(path.exists());
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_concurrent_writers_to_same_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..5 {
                        WorkbookWriter.write(&path, &[sample_sheet()]).unwrap();
                    }
                });
            }
        });

        let sheets = crate::importer::ExcelParser.parse_all_sheets(&path).unwrap();
        assert_eq!(sheets[0].0, "统计");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_invalid_sheet_name_leaves_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");
        std::fs::write(&path, b"previous").unwrap();

        let bad = SheetData::new("bad[name]", TidyTable::new(["a"]));
        let err = WorkbookWriter.write(&path, &[bad]).unwrap_err();

        assert!(matches!(err, OutputError::Write { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), b"previous");
    }

    #[test]
    fn test_excel_date_range() {
        assert!(excel_date(2024, 3, 1).is_some());
        assert!(excel_date(-5, 1, 1).is_none());
    }
}
