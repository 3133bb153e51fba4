// ==========================================
// 燃料月报汇总 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 导入错误均为单文件级别，调用方记录后跳过该文件
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("Excel 文件无工作表: {0}")]
    EmptyWorkbook(String),

    // ===== 版式/字段错误 =====
    #[error("版式不符: 需要至少 {required} 列（第 {column} 列映射为 '{field}'），实际 {actual} 列")]
    SchemaMismatch {
        field: String,
        column: usize,
        required: usize,
        actual: usize,
    },

    #[error("表头缺少必需列 '{field}'（候选: {candidates:?}），表头为: {headers:?}")]
    MissingHeader {
        field: String,
        candidates: Vec<String>,
        headers: Vec<String>,
    },

    #[error("无法从文件名解析报表月份: {0}")]
    InvalidReportMonth(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
