// ==========================================
// 燃料月报汇总 - 核心库
// ==========================================
// 流程: 导入 → 规范化 → 合并 → 统计 → 输出
// 输入: 无人值守化验/称重站的固定版式 Excel 月报
// 输出: 原始数据 + 加权平均统计 + 供应商汇总工作簿
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 单元格、整洁表、记录
pub mod domain;

// 导入层 - Excel 月报读取与规范化
pub mod importer;

// 引擎层 - 统计汇总
pub mod engine;

// 输出层 - 工作簿写出与预览
pub mod output;

// 配置层
pub mod config;

// 进度事件
pub mod progress;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 流程入口与任务调度
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use api::{
    preview_report, run_assay_report, run_report, run_weighing_report, ReportError,
    ReportJobRunner, ReportResult, RunSummary,
};
pub use config::{ConfigManager, ReportConfig, ReportSettings};
pub use domain::{CellValue, ReportKind, TidyTable};
pub use output::SheetPreview;
pub use progress::{ChannelSink, NoopSink, ProgressEvent, ProgressSink, Stage};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "燃料月报汇总";
