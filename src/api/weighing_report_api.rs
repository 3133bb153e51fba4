// ==========================================
// 燃料月报汇总 - 称重月报流程
// ==========================================
// 输出:
// - 主工作簿: 合并表
// - 分类工作簿: 合并数据 + 月度供应量/累计年度供应量/平均/最大/最小供应量
// ==========================================

use crate::api::error::ReportResult;
use crate::api::report_api::{ReportPipeline, WorkbookPlan};
use crate::config::{ReportConfig, ReportSettings};
use crate::domain::{ReportKind, TidyTable, WeighingRecord};
use crate::engine::WeighingStatsEngine;
use crate::importer::{SheetLayout, WeighingNormalizer};
use crate::output::{weighing_sheets, WEIGHING_COLUMNS};
use tracing::debug;

pub struct WeighingPipeline;

impl ReportPipeline for WeighingPipeline {
    type Normalizer = WeighingNormalizer;

    fn kind(&self) -> ReportKind {
        ReportKind::Weighing
    }

    fn normalizer(&self, settings: &ReportSettings) -> WeighingNormalizer {
        WeighingNormalizer::new(
            settings.manifest_for(ReportKind::Weighing),
            SheetLayout::default(),
        )
    }

    fn canonical_columns(&self) -> &'static [&'static str] {
        &WEIGHING_COLUMNS
    }

    fn build_workbooks(
        &self,
        config: &ReportConfig,
        table: TidyTable,
    ) -> ReportResult<Vec<WorkbookPlan>> {
        let records = WeighingRecord::from_table(&table)?;
        let stats = WeighingStatsEngine.compute(&records);
        debug!(
            records = records.len(),
            groups = stats.by_month_supplier.len(),
            suppliers = stats.by_supplier.len(),
            "称重统计完成"
        );

        Ok(vec![
            WorkbookPlan {
                path: config.primary_output_path(ReportKind::Weighing),
                sheets: weighing_sheets::primary_sheets(table.clone()),
            },
            WorkbookPlan {
                path: config.classified_output_path(ReportKind::Weighing),
                sheets: weighing_sheets::classified_sheets(table, &stats),
            },
        ])
    }
}
