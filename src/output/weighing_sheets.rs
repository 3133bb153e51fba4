// ==========================================
// 燃料月报汇总 - 称重月报工作表组装
// ==========================================
// 主工作簿: 合并表（单工作表）
// 分类工作簿: 合并数据 / 月度供应量 / 累计年度供应量 / 平均供应量 / 最大供应量 / 最小供应量
// ==========================================

use crate::domain::{field, CellValue, TidyTable};
use crate::engine::{SupplyStat, WeighingStatistics};
use crate::output::sheet::SheetData;

/// 合并表列顺序
pub const WEIGHING_COLUMNS: [&str; 8] = [
    field::SEQ,
    field::REPORT_MONTH,
    field::SUPPLY_UNIT,
    field::SUPPLIER,
    field::MONTH_SUPPLIER,
    field::CARRIER,
    field::VEHICLES,
    field::WEIGHT,
];

pub const SHEET_PRIMARY: &str = "Sheet1";
pub const SHEET_MERGED: &str = "合并数据";
pub const SHEET_MONTHLY_SUPPLY: &str = "月度供应量";
pub const SHEET_CUMULATIVE_SUPPLY: &str = "累计年度供应量";
pub const SHEET_AVERAGE_SUPPLY: &str = "平均供应量";
pub const SHEET_MAX_SUPPLY: &str = "最大供应量";
pub const SHEET_MIN_SUPPLY: &str = "最小供应量";

pub fn primary_sheets(merged: TidyTable) -> Vec<SheetData> {
    vec![SheetData::new(SHEET_PRIMARY, merged)]
}

pub fn classified_sheets(merged: TidyTable, stats: &WeighingStatistics) -> Vec<SheetData> {
    let mut cumulative = TidyTable::new([field::SUPPLIER, field::WEIGHT]);
    for total in &stats.by_supplier {
        cumulative.push_row(vec![
            CellValue::Text(total.supplier.clone()),
            CellValue::from_stat(total.total),
        ]);
    }

    vec![
        SheetData::new(SHEET_MERGED, merged),
        supply_sheet(SHEET_MONTHLY_SUPPLY, &stats.by_month_supplier, |s| s.total),
        SheetData::new(SHEET_CUMULATIVE_SUPPLY, cumulative).with_stat_columns([field::WEIGHT]),
        supply_sheet(SHEET_AVERAGE_SUPPLY, &stats.by_month_supplier, |s| s.mean),
        supply_sheet(SHEET_MAX_SUPPLY, &stats.by_month_supplier, |s| s.max),
        supply_sheet(SHEET_MIN_SUPPLY, &stats.by_month_supplier, |s| s.min),
    ]
}

fn supply_sheet(name: &str, stats: &[SupplyStat], value: impl Fn(&SupplyStat) -> f64) -> SheetData {
    let mut table = TidyTable::new([field::REPORT_MONTH, field::SUPPLIER, field::WEIGHT]);
    for stat in stats {
        table.push_row(vec![
            CellValue::Text(stat.month.clone()),
            CellValue::Text(stat.supplier.clone()),
            CellValue::from_stat(value(stat)),
        ]);
    }
    SheetData::new(name, table).with_stat_columns([field::WEIGHT])
}
