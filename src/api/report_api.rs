// ==========================================
// 燃料月报汇总 - 报表流程编排
// ==========================================
// 职责: 导入 → 合并 → 列选择 → 统计 → 写出，全程发出进度事件
// 流程:
// 1. 检查输入目录
// 2. 逐文件导入（单文件失败跳过）
// 3. 无可处理文件 → NoProcessableFiles，不生成工作簿
// 4. 按规范列顺序选择（列缺失 → 中止本报表）
// 5. 统计 + 组装工作表
// 6. 逐个写出工作簿（单个失败不影响其余，结束后报告失败）
// ==========================================

use crate::api::assay_report_api::AssayPipeline;
use crate::api::error::{ReportError, ReportResult};
use crate::api::weighing_report_api::WeighingPipeline;
use crate::config::{ReportConfig, ReportSettings};
use crate::domain::{ReportKind, TidyTable};
use crate::importer::{FileOutcome, ReportImporter, SheetNormalizer, SkippedFile};
use crate::output::{preview_workbook, SheetData, SheetPreview, WorkbookWriter};
use crate::progress::{ProgressEvent, ProgressSink, Reporter, Stage};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// 运行摘要
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub kind: ReportKind,
    pub run_id: String,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    /// 成功处理的文件
    pub processed: Vec<FileOutcome>,
    /// 跳过的文件（含原因）
    pub skipped: Vec<SkippedFile>,
    /// 合并后的整洁表行数
    pub rows: usize,
    /// 已写出的工作簿
    pub workbooks: Vec<PathBuf>,
}

/// 一个待写出的工作簿
pub struct WorkbookPlan {
    pub path: PathBuf,
    pub sheets: Vec<SheetData>,
}

// ==========================================
// ReportPipeline - 报表类型差异点
// ==========================================
pub trait ReportPipeline {
    type Normalizer: SheetNormalizer;

    fn kind(&self) -> ReportKind;

    fn normalizer(&self, settings: &ReportSettings) -> Self::Normalizer;

    /// 合并表的规范列顺序
    fn canonical_columns(&self) -> &'static [&'static str];

    /// 统计并组装工作簿（table 已按规范列顺序选择）
    fn build_workbooks(
        &self,
        config: &ReportConfig,
        table: TidyTable,
    ) -> ReportResult<Vec<WorkbookPlan>>;
}

// ==========================================
// 入口函数
// ==========================================

/// 化验月报汇总
pub fn run_assay_report(
    config: &ReportConfig,
    sink: &dyn ProgressSink,
) -> ReportResult<RunSummary> {
    run_pipeline(&AssayPipeline, config, sink)
}

/// 称重月报汇总
pub fn run_weighing_report(
    config: &ReportConfig,
    sink: &dyn ProgressSink,
) -> ReportResult<RunSummary> {
    run_pipeline(&WeighingPipeline, config, sink)
}

/// 按类型运行
pub fn run_report(
    kind: ReportKind,
    config: &ReportConfig,
    sink: &dyn ProgressSink,
) -> ReportResult<RunSummary> {
    match kind {
        ReportKind::Assay => run_assay_report(config, sink),
        ReportKind::Weighing => run_weighing_report(config, sink),
    }
}

/// 预览已生成的工作簿（化验 → 主工作簿，称重 → 分类工作簿）
pub fn preview_report(kind: ReportKind, config: &ReportConfig) -> ReportResult<Vec<SheetPreview>> {
    Ok(preview_workbook(&config.preview_path(kind))?)
}

// ==========================================
// 通用流程
// ==========================================

#[instrument(skip_all, fields(kind = %pipeline.kind()))]
pub fn run_pipeline<P: ReportPipeline>(
    pipeline: &P,
    config: &ReportConfig,
    sink: &dyn ProgressSink,
) -> ReportResult<RunSummary> {
    let reporter = Reporter::new(Some(sink));
    let kind = pipeline.kind();

    reporter.emit(ProgressEvent::JobStarted { kind });
    let result = execute(pipeline, config, reporter);
    match &result {
        Ok(_) => reporter.emit(ProgressEvent::JobFinished { kind }),
        Err(e) => reporter.emit(ProgressEvent::JobFailed {
            kind,
            reason: e.to_string(),
        }),
    }
    result
}

fn execute<P: ReportPipeline>(
    pipeline: &P,
    config: &ReportConfig,
    reporter: Reporter<'_>,
) -> ReportResult<RunSummary> {
    let kind = pipeline.kind();
    let settings = config.settings(kind);
    let started_at = Local::now();
    let run_id = Uuid::new_v4().to_string();

    // ===== 1. 导入 =====
    let input_dir = &settings.input_dir;
    if !input_dir.is_dir() {
        return Err(ReportError::InputDirMissing(input_dir.display().to_string()));
    }

    reporter.emit(ProgressEvent::StageStarted {
        kind,
        stage: Stage::Ingest,
    });
    let importer = ReportImporter::new(pipeline.normalizer(settings), &settings.extensions);
    let outcome = importer.import_dir(input_dir, reporter)?;

    let mut summary = RunSummary {
        kind,
        run_id,
        started_at,
        finished_at: started_at,
        processed: outcome.processed.clone(),
        skipped: outcome.skipped.clone(),
        rows: outcome.table.len(),
        workbooks: Vec::new(),
    };

    if !outcome.has_data() {
        reporter.emit(ProgressEvent::NoProcessableFiles {
            kind,
            dir: input_dir.display().to_string(),
        });
        summary.finished_at = Local::now();
        return Ok(summary);
    }

    reporter.emit(ProgressEvent::MergeCompleted {
        files: outcome.processed.len(),
        rows: outcome.table.len(),
    });

    // ===== 2. 列选择 + 统计 =====
    let table = outcome.table.select(pipeline.canonical_columns())?;

    reporter.emit(ProgressEvent::StageStarted {
        kind,
        stage: Stage::Aggregate,
    });
    let plans = pipeline.build_workbooks(config, table)?;

    // ===== 3. 写出 =====
    reporter.emit(ProgressEvent::StageStarted {
        kind,
        stage: Stage::Output,
    });
    let writer = WorkbookWriter;
    let mut first_error: Option<ReportError> = None;
    for plan in plans {
        let path_str = plan.path.display().to_string();
        match writer.write(&plan.path, &plan.sheets) {
            Ok(()) => {
                reporter.emit(ProgressEvent::WorkbookSaved { path: path_str });
                summary.workbooks.push(plan.path);
            }
            Err(e) => {
                reporter.emit(ProgressEvent::WorkbookFailed {
                    path: path_str,
                    reason: e.to_string(),
                });
                first_error.get_or_insert(e.into());
            }
        }
    }

    if let Some(err) = first_error {
        return Err(err);
    }

    summary.finished_at = Local::now();
    info!(
        run_id = %summary.run_id,
        processed = summary.processed.len(),
        skipped = summary.skipped.len(),
        rows = summary.rows,
        workbooks = summary.workbooks.len(),
        "报表汇总完成"
    );
    Ok(summary)
}
