// ==========================================
// 燃料月报汇总 - 进度事件
// ==========================================
// 职责: 定义任务进度事件与接收端 trait
// 说明: 核心流程只依赖 ProgressSink，不关心消息经 HTTP 流、桌面文本框还是终端送达
// ==========================================

use crate::domain::ReportKind;
use crate::i18n::{t, t_with_args};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

// ==========================================
// 流程阶段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Ingest,
    Aggregate,
    Output,
}

// ==========================================
// 进度事件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    JobStarted { kind: ReportKind },
    StageStarted { kind: ReportKind, stage: Stage },
    FileProcessed { file: String, rows: usize },
    FileEmpty { file: String },
    FileSkipped { file: String, reason: String },
    MergeCompleted { files: usize, rows: usize },
    NoProcessableFiles { kind: ReportKind, dir: String },
    WorkbookSaved { path: String },
    WorkbookFailed { path: String, reason: String },
    JobFinished { kind: ReportKind },
    JobFailed { kind: ReportKind, reason: String },
}

impl ProgressEvent {
    /// 本地化的可读消息
    pub fn message(&self) -> String {
        match self {
            ProgressEvent::JobStarted { kind } => {
                t_with_args("progress.job_started", &[("report", &report_name(*kind))])
            }
            ProgressEvent::StageStarted { stage, .. } => match stage {
                Stage::Ingest => t("progress.stage_ingest"),
                Stage::Aggregate => t("progress.stage_aggregate"),
                Stage::Output => t("progress.stage_output"),
            },
            ProgressEvent::FileProcessed { file, rows } => t_with_args(
                "progress.file_processed",
                &[("file", file), ("rows", &rows.to_string())],
            ),
            ProgressEvent::FileEmpty { file } => {
                t_with_args("progress.file_empty", &[("file", file)])
            }
            ProgressEvent::FileSkipped { file, reason } => t_with_args(
                "progress.file_skipped",
                &[("file", file), ("reason", reason)],
            ),
            ProgressEvent::MergeCompleted { files, rows } => t_with_args(
                "progress.merge_completed",
                &[("files", &files.to_string()), ("rows", &rows.to_string())],
            ),
            ProgressEvent::NoProcessableFiles { dir, .. } => {
                t_with_args("progress.no_files", &[("dir", dir)])
            }
            ProgressEvent::WorkbookSaved { path } => {
                t_with_args("progress.workbook_saved", &[("path", path)])
            }
            ProgressEvent::WorkbookFailed { path, reason } => t_with_args(
                "progress.workbook_failed",
                &[("path", path), ("reason", reason)],
            ),
            ProgressEvent::JobFinished { kind } => {
                t_with_args("progress.job_finished", &[("report", &report_name(*kind))])
            }
            ProgressEvent::JobFailed { reason, .. } => {
                t_with_args("progress.job_failed", &[("reason", reason)])
            }
        }
    }

    /// 是否为告警/错误类事件
    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            ProgressEvent::FileEmpty { .. }
                | ProgressEvent::FileSkipped { .. }
                | ProgressEvent::NoProcessableFiles { .. }
                | ProgressEvent::WorkbookFailed { .. }
                | ProgressEvent::JobFailed { .. }
        )
    }
}

fn report_name(kind: ReportKind) -> String {
    t(&format!("report.{}", kind.as_str()))
}

// ==========================================
// 进度接收端 Trait
// ==========================================
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: &ProgressEvent);
}

/// 闭包接收端
impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn emit(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// 通道接收端（接收方关闭后静默丢弃）
#[derive(Debug, Clone)]
pub struct ChannelSink(pub UnboundedSender<ProgressEvent>);

impl ProgressSink for ChannelSink {
    fn emit(&self, event: &ProgressEvent) {
        let _ = self.0.send(event.clone());
    }
}

/// 空操作接收端
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn emit(&self, _event: &ProgressEvent) {}
}

// ==========================================
// Reporter - 日志 + 转发
// ==========================================
// 所有事件都写入 tracing；配置了接收端时同时转发
#[derive(Clone, Copy)]
pub struct Reporter<'a> {
    sink: Option<&'a dyn ProgressSink>,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: Option<&'a dyn ProgressSink>) -> Self {
        Self { sink }
    }

    pub fn emit(&self, event: ProgressEvent) {
        if event.is_problem() {
            tracing::warn!(event = ?event, "{}", event.message());
        } else {
            tracing::info!("{}", event.message());
        }
        if let Some(sink) = self.sink {
            sink.emit(&event);
        }
    }
}
