// ==========================================
// 燃料月报汇总 - 报表导入 Trait
// ==========================================
// 职责: 定义单个工作表 → 整洁表 的规范化接口（不包含实现）
// 实现者: AssayNormalizer, WeighingNormalizer
// ==========================================

use crate::domain::{ReportKind, TidyTable};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawSheet;
use std::path::Path;

// ==========================================
// SheetNormalizer Trait
// ==========================================
pub trait SheetNormalizer: Send + Sync {
    /// 报表类型
    fn kind(&self) -> ReportKind;

    /// 将原始工作表规范化为整洁表
    ///
    /// # 参数
    /// - path: 源文件路径（称重月报从文件名取报表月份）
    /// - sheet: 原始工作表
    ///
    /// # 返回
    /// - Ok(TidyTable): 含派生列（供应商全称、报表月份供应商）的整洁表
    /// - Err: 版式不符、文件名无法解析等单文件错误
    fn normalize(&self, path: &Path, sheet: &RawSheet) -> ImportResult<TidyTable>;
}
