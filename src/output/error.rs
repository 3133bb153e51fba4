// ==========================================
// 燃料月报汇总 - 输出模块错误类型
// ==========================================
// 说明: 写出失败只影响当前工作簿，已存在的旧文件保持不变
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("工作簿写出失败: {path}: {message}")]
    Write { path: String, message: String },

    #[error("工作簿读取失败: {path}: {message}")]
    Read { path: String, message: String },

    #[error("工作簿不存在: {0}")]
    NotFound(String),
}

impl OutputError {
    pub fn write(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        OutputError::Write {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn read(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        OutputError::Read {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub type OutputResult<T> = Result<T, OutputError>;
