// ==========================================
// 燃料月报汇总 - API 层错误类型
// ==========================================
// 职责: 流程级错误（区别于单文件级的 ImportError）
// 处理策略:
// - 单文件失败 → 跳过，不进入这里
// - 列缺失 → 中止当前报表流程
// - 工作簿写出失败 → 其余工作簿照常尝试，结束后报告失败
// ==========================================

use crate::config::ConfigError;
use crate::domain::{ReportKind, SchemaError};
use crate::importer::ImportError;
use crate::output::OutputError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    // ===== 输入 =====
    #[error("输入目录不存在: {0}")]
    InputDirMissing(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    // ===== 版式 =====
    #[error("找不到列 '{column}'，当前可用的列名有: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    // ===== 输出 =====
    #[error("工作簿写出失败: {path}: {message}")]
    WorkbookWrite { path: String, message: String },

    #[error("工作簿读取失败: {path}: {message}")]
    WorkbookRead { path: String, message: String },

    #[error("工作簿不存在: {0}")]
    WorkbookNotFound(String),

    // ===== 任务调度 =====
    #[error("{0} 任务正在运行，请等待完成后再试")]
    JobAlreadyRunning(ReportKind),

    #[error("任务异常终止: {0}")]
    JobPanicked(String),

    // ===== 配置 =====
    #[error("配置错误: {0}")]
    Config(String),
}

impl From<SchemaError> for ReportError {
    fn from(err: SchemaError) -> Self {
        ReportError::MissingColumn {
            column: err.column,
            available: err.available,
        }
    }
}

impl From<OutputError> for ReportError {
    fn from(err: OutputError) -> Self {
        match err {
            OutputError::Write { path, message } => ReportError::WorkbookWrite { path, message },
            OutputError::Read { path, message } => ReportError::WorkbookRead { path, message },
            OutputError::NotFound(path) => ReportError::WorkbookNotFound(path),
        }
    }
}

impl From<ConfigError> for ReportError {
    fn from(err: ConfigError) -> Self {
        ReportError::Config(err.to_string())
    }
}

pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_maps_to_missing_column() {
        let err: ReportError = SchemaError {
            column: "车数".to_string(),
            available: vec!["序号".to_string(), "重量".to_string()],
        }
        .into();

        match &err {
            ReportError::MissingColumn { column, available } => {
                assert_eq!(column, "车数");
                assert_eq!(available.len(), 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(err.to_string().contains("车数"));
        assert!(err.to_string().contains("重量"));
    }

    #[test]
    fn test_output_error_mapping() {
        let err: ReportError = OutputError::write("a.xlsx", "disk full").into();
        assert!(matches!(err, ReportError::WorkbookWrite { ref path, .. } if path == "a.xlsx"));
    }
}
