// ==========================================
// 燃料月报汇总 - 化验月报流程
// ==========================================
// 输出:
// - 主工作簿: 原始数据 / 月度统计 / 公司发热量加权平均
// - 分类工作簿: 按 (月份, 供应商) 与 按供应商累计 的五项指标加权平均
// ==========================================

use crate::api::error::ReportResult;
use crate::api::report_api::{ReportPipeline, WorkbookPlan};
use crate::config::{ReportConfig, ReportSettings};
use crate::domain::{AssayRecord, ReportKind, TidyTable};
use crate::engine::AssayStatsEngine;
use crate::importer::{AssayNormalizer, SheetLayout};
use crate::output::{assay_sheets, ASSAY_RAW_COLUMNS};
use tracing::debug;

pub struct AssayPipeline;

impl ReportPipeline for AssayPipeline {
    type Normalizer = AssayNormalizer;

    fn kind(&self) -> ReportKind {
        ReportKind::Assay
    }

    fn normalizer(&self, settings: &ReportSettings) -> AssayNormalizer {
        AssayNormalizer::new(settings.manifest_for(ReportKind::Assay), SheetLayout::default())
    }

    fn canonical_columns(&self) -> &'static [&'static str] {
        &ASSAY_RAW_COLUMNS
    }

    fn build_workbooks(
        &self,
        config: &ReportConfig,
        table: TidyTable,
    ) -> ReportResult<Vec<WorkbookPlan>> {
        let records = AssayRecord::from_table(&table)?;
        let stats = AssayStatsEngine.compute(&records);
        debug!(
            records = records.len(),
            months = stats.monthly.len().saturating_sub(1),
            companies = stats.company_heat.len(),
            "化验统计完成"
        );

        let classified = assay_sheets::classified_sheets(&stats);
        let primary = assay_sheets::primary_sheets(table, &stats);

        Ok(vec![
            WorkbookPlan {
                path: config.primary_output_path(ReportKind::Assay),
                sheets: primary,
            },
            WorkbookPlan {
                path: config.classified_output_path(ReportKind::Assay),
                sheets: classified,
            },
        ])
    }
}
