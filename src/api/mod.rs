// ==========================================
// 燃料月报汇总 - API 层
// ==========================================
// 职责: 报表流程入口、任务调度、预览，供 CLI 或上层服务调用
// ==========================================

pub mod assay_report_api;
pub mod error;
pub mod job_runner;
pub mod report_api;
pub mod weighing_report_api;

// 重导出核心类型
pub use assay_report_api::AssayPipeline;
pub use error::{ReportError, ReportResult};
pub use job_runner::{ReportJob, ReportJobRunner};
pub use report_api::{
    preview_report, run_assay_report, run_pipeline, run_report, run_weighing_report,
    ReportPipeline, RunSummary, WorkbookPlan,
};
pub use weighing_report_api::WeighingPipeline;
