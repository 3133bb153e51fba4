// ==========================================
// 燃料月报汇总 - 输出层
// ==========================================
// 职责: 统计结果 → 工作表 → xlsx；已生成工作簿的预览
// ==========================================

pub mod assay_sheets;
pub mod error;
pub mod preview;
pub mod sheet;
pub mod weighing_sheets;
pub mod workbook_writer;

pub use assay_sheets::ASSAY_RAW_COLUMNS;
pub use error::{OutputError, OutputResult};
pub use preview::{format_number, preview_workbook, SheetPreview};
pub use sheet::SheetData;
pub use weighing_sheets::WEIGHING_COLUMNS;
pub use workbook_writer::WorkbookWriter;
