// ==========================================
// 燃料月报汇总 - 导入层
// ==========================================
// 职责: 读取固定版式的 Excel 月报，规范化为整洁表并合并
// 支持: Excel (.xlsx/.xls)
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod derivation;
pub mod error;
pub mod file_parser;
pub mod normalizer;
pub mod report_importer;
pub mod report_importer_trait;
pub mod schema;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use derivation::DerivationService;
pub use error::{ImportError, ImportResult};
pub use file_parser::{is_excel_file, ExcelParser, RawSheet, SheetLayout, EXCEL_EXTENSIONS};
pub use normalizer::{AssayNormalizer, WeighingNormalizer};
pub use report_importer::{FileOutcome, ImportOutcome, ReportImporter, SkippedFile};
pub use schema::{ColumnSource, ColumnSpec, SchemaManifest};

// 重导出 Trait 接口
pub use report_importer_trait::SheetNormalizer;
