// ==========================================
// 燃料月报汇总 - 类型化记录
// ==========================================
// 职责: 合并后整洁表的行级类型化视图，供统计引擎使用
// ==========================================

use crate::domain::cell::CellValue;
use crate::domain::table::{SchemaError, TidyTable};
use crate::domain::types::field;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 化验指标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssayMetric {
    HeatValue,
    Moisture,
    Sulfur,
    Volatile,
    Ash,
}

impl AssayMetric {
    /// 月度统计表中的指标顺序
    pub const MONTHLY: [AssayMetric; 4] = [
        AssayMetric::Moisture,
        AssayMetric::Sulfur,
        AssayMetric::HeatValue,
        AssayMetric::Volatile,
    ];

    /// 分类汇总表中的指标顺序
    pub const CLASSIFIED: [AssayMetric; 5] = [
        AssayMetric::HeatValue,
        AssayMetric::Moisture,
        AssayMetric::Sulfur,
        AssayMetric::Volatile,
        AssayMetric::Ash,
    ];

    /// 原始数据中的列名
    pub fn field_name(&self) -> &'static str {
        match self {
            AssayMetric::HeatValue => field::HEAT_VALUE,
            AssayMetric::Moisture => field::MOISTURE,
            AssayMetric::Sulfur => field::SULFUR,
            AssayMetric::Volatile => field::VOLATILE,
            AssayMetric::Ash => field::ASH,
        }
    }

    /// 工作表/统计列使用的简称
    pub fn label(&self) -> &'static str {
        match self {
            AssayMetric::HeatValue => "发热量",
            AssayMetric::Moisture => "全水Mt",
            AssayMetric::Sulfur => "全硫",
            AssayMetric::Volatile => "挥发份",
            AssayMetric::Ash => "灰份",
        }
    }
}

// ==========================================
// 化验记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssayRecord {
    pub seq: Option<i64>,
    pub company_name: String,
    pub tonnage: Option<f64>,
    pub assay_date: Option<NaiveDate>,
    pub moisture: Option<f64>,
    pub ash: Option<f64>,
    pub volatile: Option<f64>,
    pub fixed_carbon: Option<f64>,
    pub sulfur: Option<f64>,
    pub heat_value: Option<f64>,
    pub supplier_name: String,
    pub month_supplier_key: Option<String>,
}

impl AssayRecord {
    /// 统计月份（YYYY-MM），化验日期缺失时为 None
    pub fn month(&self) -> Option<String> {
        self.assay_date.map(|d| d.format("%Y-%m").to_string())
    }

    pub fn metric(&self, metric: AssayMetric) -> Option<f64> {
        match metric {
            AssayMetric::HeatValue => self.heat_value,
            AssayMetric::Moisture => self.moisture,
            AssayMetric::Sulfur => self.sulfur,
            AssayMetric::Volatile => self.volatile,
            AssayMetric::Ash => self.ash,
        }
    }

    pub fn from_table(table: &TidyTable) -> Result<Vec<Self>, SchemaError> {
        let seq = table.require_column(field::SEQ)?;
        let company = table.require_column(field::COMPANY)?;
        let tonnage = table.require_column(field::TONNAGE)?;
        let date = table.require_column(field::ASSAY_DATE)?;
        let moisture = table.require_column(field::MOISTURE)?;
        let ash = table.require_column(field::ASH)?;
        let volatile = table.require_column(field::VOLATILE)?;
        let fixed_carbon = table.require_column(field::FIXED_CARBON)?;
        let sulfur = table.require_column(field::SULFUR)?;
        let heat = table.require_column(field::HEAT_VALUE)?;
        let supplier = table.require_column(field::SUPPLIER)?;
        let key = table.require_column(field::MONTH_SUPPLIER)?;

        Ok(table
            .rows()
            .iter()
            .map(|row| AssayRecord {
                seq: integer(&row[seq]),
                company_name: text(&row[company]).unwrap_or_default(),
                tonnage: row[tonnage].as_f64(),
                assay_date: row[date].as_date(),
                moisture: row[moisture].as_f64(),
                ash: row[ash].as_f64(),
                volatile: row[volatile].as_f64(),
                fixed_carbon: row[fixed_carbon].as_f64(),
                sulfur: row[sulfur].as_f64(),
                heat_value: row[heat].as_f64(),
                supplier_name: text(&row[supplier]).unwrap_or_default(),
                month_supplier_key: text(&row[key]),
            })
            .collect())
    }
}

// ==========================================
// 称重记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighingRecord {
    pub seq: Option<i64>,
    pub report_month: String,
    pub supply_unit: String,
    pub supplier_name: String,
    pub month_supplier_key: String,
    pub carrier: Option<String>,
    pub vehicles: Option<f64>,
    pub weight: Option<f64>,
}

impl WeighingRecord {
    pub fn from_table(table: &TidyTable) -> Result<Vec<Self>, SchemaError> {
        let seq = table.require_column(field::SEQ)?;
        let month = table.require_column(field::REPORT_MONTH)?;
        let unit = table.require_column(field::SUPPLY_UNIT)?;
        let supplier = table.require_column(field::SUPPLIER)?;
        let key = table.require_column(field::MONTH_SUPPLIER)?;
        let carrier = table.require_column(field::CARRIER)?;
        let vehicles = table.require_column(field::VEHICLES)?;
        let weight = table.require_column(field::WEIGHT)?;

        Ok(table
            .rows()
            .iter()
            .map(|row| WeighingRecord {
                seq: integer(&row[seq]),
                report_month: text(&row[month]).unwrap_or_default(),
                supply_unit: text(&row[unit]).unwrap_or_default(),
                supplier_name: text(&row[supplier]).unwrap_or_default(),
                month_supplier_key: text(&row[key]).unwrap_or_default(),
                carrier: text(&row[carrier]),
                vehicles: row[vehicles].as_f64(),
                weight: row[weight].as_f64(),
            })
            .collect())
    }
}

fn integer(cell: &CellValue) -> Option<i64> {
    cell.as_f64().map(|n| n.round() as i64)
}

fn text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Empty => None,
        other => Some(other.to_string()),
    }
}
