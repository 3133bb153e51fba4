// ==========================================
// 燃料月报汇总 - 化验月报工作表组装
// ==========================================
// 主工作簿: 原始数据 / 月度统计 / 公司发热量加权平均
// 分类工作簿: 加权平均{指标} ×5 + 累计加权平均{指标} ×5
// ==========================================

use crate::domain::{field, AssayMetric, CellValue, TidyTable};
use crate::engine::{AssayStatistics, CompanyHeatStat, MonthlyAssayStat};
use crate::output::sheet::SheetData;

/// 原始数据工作表的列顺序
pub const ASSAY_RAW_COLUMNS: [&str; 12] = [
    field::SEQ,
    field::COMPANY,
    field::MONTH_SUPPLIER,
    field::SUPPLIER,
    field::TONNAGE,
    field::ASSAY_DATE,
    field::MOISTURE,
    field::ASH,
    field::VOLATILE,
    field::FIXED_CARBON,
    field::SULFUR,
    field::HEAT_VALUE,
];

pub const SHEET_RAW: &str = "原始数据";
pub const SHEET_MONTHLY: &str = "月度统计";
pub const SHEET_COMPANY_HEAT: &str = "公司发热量加权平均";

const STAT_MONTH: &str = "统计月份";
const MONTHLY_TONNAGE: &str = "月度来煤量";
const TOTAL_TONNAGE: &str = "来煤总量";
const WEIGHTED_HEAT: &str = "加权平均发热量";

fn monthly_column(metric: AssayMetric) -> String {
    format!("{}_加权平均", metric.field_name())
}

/// 按月 + 供应商的工作表名（同时作为统计列名）
pub fn weighted_sheet_name(metric: AssayMetric) -> String {
    format!("加权平均{}", metric.label())
}

/// 按供应商累计的工作表名（同时作为统计列名）
pub fn cumulative_sheet_name(metric: AssayMetric) -> String {
    format!("累计加权平均{}", metric.label())
}

/// 主工作簿（raw 为已按 ASSAY_RAW_COLUMNS 选择的合并表）
pub fn primary_sheets(raw: TidyTable, stats: &AssayStatistics) -> Vec<SheetData> {
    vec![
        SheetData::new(SHEET_RAW, raw),
        monthly_sheet(&stats.monthly),
        company_heat_sheet(&stats.company_heat),
    ]
}

fn monthly_sheet(monthly: &[MonthlyAssayStat]) -> SheetData {
    let metric_cols: Vec<String> = AssayMetric::MONTHLY.iter().map(|m| monthly_column(*m)).collect();

    let mut columns = vec![STAT_MONTH.to_string(), MONTHLY_TONNAGE.to_string()];
    columns.extend(metric_cols.iter().cloned());

    let mut table = TidyTable::new(columns);
    for stat in monthly {
        let mut row = vec![
            CellValue::Text(stat.month.clone()),
            CellValue::from_stat(stat.tonnage),
        ];
        row.extend(
            AssayMetric::MONTHLY
                .iter()
                .map(|m| CellValue::from_stat(stat.metric(*m))),
        );
        table.push_row(row);
    }

    SheetData::new(SHEET_MONTHLY, table).with_stat_columns(metric_cols)
}

fn company_heat_sheet(stats: &[CompanyHeatStat]) -> SheetData {
    let mut table = TidyTable::new([field::COMPANY, TOTAL_TONNAGE, WEIGHTED_HEAT]);
    for stat in stats {
        table.push_row(vec![
            CellValue::Text(stat.company.clone()),
            CellValue::from_stat(stat.total_tonnage),
            CellValue::from_stat(stat.weighted_heat_value),
        ]);
    }
    SheetData::new(SHEET_COMPANY_HEAT, table).with_stat_columns([WEIGHTED_HEAT])
}

/// 分类工作簿
pub fn classified_sheets(stats: &AssayStatistics) -> Vec<SheetData> {
    let mut sheets = Vec::with_capacity(stats.by_month_supplier.len() + stats.by_supplier.len());

    for (metric, values) in &stats.by_month_supplier {
        let name = weighted_sheet_name(*metric);
        let mut table = TidyTable::new([field::REPORT_MONTH, field::SUPPLIER, name.as_str()]);
        for v in values {
            table.push_row(vec![
                CellValue::Text(v.month.clone()),
                CellValue::Text(v.supplier.clone()),
                CellValue::from_stat(v.value),
            ]);
        }
        sheets.push(SheetData::new(name.clone(), table).with_stat_columns([name]));
    }

    for (metric, values) in &stats.by_supplier {
        let name = cumulative_sheet_name(*metric);
        let mut table = TidyTable::new([field::SUPPLIER, name.as_str()]);
        for v in values {
            table.push_row(vec![
                CellValue::Text(v.supplier.clone()),
                CellValue::from_stat(v.value),
            ]);
        }
        sheets.push(SheetData::new(name.clone(), table).with_stat_columns([name]));
    }

    sheets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MonthSupplierValue, SupplierValue};

    fn stats() -> AssayStatistics {
        AssayStatistics {
            monthly: vec![MonthlyAssayStat {
                month: "2024-01".into(),
                tonnage: 400.0,
                moisture: 10.0,
                sulfur: 0.5,
                heat_value: 5750.0,
                volatile: f64::NAN,
            }],
            company_heat: vec![],
            by_month_supplier: AssayMetric::CLASSIFIED
                .iter()
                .map(|m| {
                    (
                        *m,
                        vec![MonthSupplierValue {
                            month: "2024-01".into(),
                            supplier: "A".into(),
                            value: 1.0,
                        }],
                    )
                })
                .collect(),
            by_supplier: AssayMetric::CLASSIFIED
                .iter()
                .map(|m| {
                    (
                        *m,
                        vec![SupplierValue {
                            supplier: "A".into(),
                            value: 1.0,
                        }],
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_monthly_sheet_layout() {
        let sheets = primary_sheets(TidyTable::new(ASSAY_RAW_COLUMNS), &stats());
        let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![SHEET_RAW, SHEET_MONTHLY, SHEET_COMPANY_HEAT]);

        let monthly = &sheets[1];
        assert_eq!(
            monthly.table.columns(),
            &[
                "统计月份",
                "月度来煤量",
                "全水Mt_加权平均",
                "全硫_加权平均",
                "发热量_加权平均",
                "挥发份Vdaf_加权平均"
            ]
        );
        assert_eq!(
            monthly.table.get(0, "挥发份Vdaf_加权平均"),
            Some(&CellValue::Empty)
        );
        assert!(monthly.is_stat_column("发热量_加权平均"));
        assert!(!monthly.is_stat_column("月度来煤量"));
    }

    #[test]
    fn test_classified_sheet_names() {
        let names: Vec<String> = classified_sheets(&stats())
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "加权平均发热量",
                "加权平均全水Mt",
                "加权平均全硫",
                "加权平均挥发份",
                "加权平均灰份",
                "累计加权平均发热量",
                "累计加权平均全水Mt",
                "累计加权平均全硫",
                "累计加权平均挥发份",
                "累计加权平均灰份",
            ]
        );
    }
}
