// ==========================================
// 燃料月报汇总 - 领域层
// ==========================================
// 职责: 单元格、整洁表、类型化记录与领域类型
// ==========================================

pub mod cell;
pub mod record;
pub mod table;
pub mod types;

// 重导出
pub use cell::CellValue;
pub use record::{AssayMetric, AssayRecord, WeighingRecord};
pub use table::{SchemaError, TidyTable};
pub use types::{field, ColumnKind, ReportKind};
