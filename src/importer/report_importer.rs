// ==========================================
// 燃料月报汇总 - 目录导入器实现
// ==========================================
// 职责: 扫描输入目录 → 逐文件解析/规范化 → 纵向合并
// 说明:
// - 单文件失败（读取/解析/版式）记录后跳过，不中断整批
// - 规范化后为空的文件同样跳过
// - 文件按文件名排序处理，合并行序 = 文件顺序 + 文件内行序
// ==========================================

use crate::domain::TidyTable;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::ExcelParser;
use crate::importer::report_importer_trait::SheetNormalizer;
use crate::progress::{ProgressEvent, Reporter};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 单文件处理结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub file: String,
    pub rows: usize,
}

/// 被跳过的文件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// 目录导入结果
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub table: TidyTable,
    pub processed: Vec<FileOutcome>,
    pub skipped: Vec<SkippedFile>,
}

impl ImportOutcome {
    pub fn has_data(&self) -> bool {
        !self.processed.is_empty()
    }
}

// ==========================================
// ReportImporter - 目录导入器
// ==========================================
pub struct ReportImporter<N: SheetNormalizer> {
    parser: ExcelParser,
    normalizer: N,
    extensions: Vec<String>,
}

impl<N: SheetNormalizer> ReportImporter<N> {
    pub fn new(normalizer: N, extensions: &[String]) -> Self {
        Self {
            parser: ExcelParser,
            normalizer,
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// 列出目录中待处理的报表文件（按文件名排序）
    pub fn list_report_files(&self, dir: &Path) -> ImportResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            // Excel 打开文件时生成的锁文件
            if name.starts_with("~$") {
                debug!(file = %name, "跳过 Excel 锁文件");
                continue;
            }
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .unwrap_or_default();
            if self.extensions.contains(&ext) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// 导入单个文件
    pub fn import_file(&self, path: &Path) -> ImportResult<TidyTable> {
        let sheet = self.parser.parse_first_sheet(path)?;
        debug!(
            file = %path.display(),
            height = sheet.height(),
            width = sheet.width(),
            "工作表读取完成"
        );
        self.normalizer.normalize(path, &sheet)
    }

    /// 导入整个目录
    pub fn import_dir(&self, dir: &Path, reporter: Reporter<'_>) -> ImportResult<ImportOutcome> {
        let files = self.list_report_files(dir)?;
        info!(
            kind = %self.normalizer.kind(),
            dir = %dir.display(),
            candidates = files.len(),
            "开始导入"
        );

        let mut outcome = ImportOutcome::default();
        let mut tables = Vec::new();

        for path in files {
            let file = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());

            match self.import_file(&path) {
                Ok(table) if table.is_empty() => {
                    reporter.emit(ProgressEvent::FileEmpty { file: file.clone() });
                    outcome.skipped.push(SkippedFile {
                        file,
                        reason: "empty".to_string(),
                    });
                }
                Ok(table) => {
                    reporter.emit(ProgressEvent::FileProcessed {
                        file: file.clone(),
                        rows: table.len(),
                    });
                    outcome.processed.push(FileOutcome {
                        file,
                        rows: table.len(),
                    });
                    tables.push(table);
                }
                Err(e) => {
                    warn!(file = %file, error = %e, "文件处理失败，已跳过");
                    reporter.emit(ProgressEvent::FileSkipped {
                        file: file.clone(),
                        reason: e.to_string(),
                    });
                    outcome.skipped.push(SkippedFile {
                        file,
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome.table = TidyTable::concat(tables);
        Ok(outcome)
    }
}
