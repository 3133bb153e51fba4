// ==========================================
// 燃料月报汇总 - 化验月报统计引擎
// ==========================================
// 职责:
// - 月度统计: 月度来煤量 + 全水/全硫/发热量/挥发份 加权平均，末行为年度累计
// - 公司发热量加权平均: 按公司名称分组
// - 按 (报表月份, 供应商) 与 按供应商累计 的五项指标加权平均
// 权重: 来煤量
// ==========================================

use crate::domain::{AssayMetric, AssayRecord};
use crate::engine::weighted::{group_by, sum, weighted_average};
use serde::Serialize;

/// 年度累计行的标签
pub const ANNUAL_LABEL: &str = "年度累计";

// ==========================================
// 统计结果类型
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAssayStat {
    /// YYYY-MM 或 年度累计
    pub month: String,
    pub tonnage: f64,
    pub moisture: f64,
    pub sulfur: f64,
    pub heat_value: f64,
    pub volatile: f64,
}

impl MonthlyAssayStat {
    pub fn metric(&self, metric: AssayMetric) -> f64 {
        match metric {
            AssayMetric::Moisture => self.moisture,
            AssayMetric::Sulfur => self.sulfur,
            AssayMetric::HeatValue => self.heat_value,
            AssayMetric::Volatile => self.volatile,
            AssayMetric::Ash => f64::NAN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyHeatStat {
    pub company: String,
    pub total_tonnage: f64,
    pub weighted_heat_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSupplierValue {
    pub month: String,
    pub supplier: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierValue {
    pub supplier: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssayStatistics {
    pub monthly: Vec<MonthlyAssayStat>,
    pub company_heat: Vec<CompanyHeatStat>,
    pub by_month_supplier: Vec<(AssayMetric, Vec<MonthSupplierValue>)>,
    pub by_supplier: Vec<(AssayMetric, Vec<SupplierValue>)>,
}

// ==========================================
// AssayStatsEngine
// ==========================================
pub struct AssayStatsEngine;

impl AssayStatsEngine {
    pub fn compute(&self, records: &[AssayRecord]) -> AssayStatistics {
        AssayStatistics {
            monthly: self.monthly_stats(records),
            company_heat: self.company_heat(records),
            by_month_supplier: AssayMetric::CLASSIFIED
                .iter()
                .map(|m| (*m, self.month_supplier_average(records, *m)))
                .collect(),
            by_supplier: AssayMetric::CLASSIFIED
                .iter()
                .map(|m| (*m, self.supplier_cumulative_average(records, *m)))
                .collect(),
        }
    }

    /// 月度统计（按月份升序）+ 年度累计行
    pub fn monthly_stats(&self, records: &[AssayRecord]) -> Vec<MonthlyAssayStat> {
        let groups = group_by(records, |r| r.month());
        let mut stats: Vec<MonthlyAssayStat> = groups
            .into_iter()
            .map(|(month, rows)| self.summarize(month, &rows))
            .collect();

        let all: Vec<&AssayRecord> = records.iter().collect();
        stats.push(self.summarize(ANNUAL_LABEL.to_string(), &all));
        stats
    }

    fn summarize(&self, month: String, rows: &[&AssayRecord]) -> MonthlyAssayStat {
        let wavg = |metric: AssayMetric| {
            weighted_average(rows.iter().map(|r| (r.metric(metric), r.tonnage)))
        };
        MonthlyAssayStat {
            month,
            tonnage: sum(rows.iter().map(|r| r.tonnage)),
            moisture: wavg(AssayMetric::Moisture),
            sulfur: wavg(AssayMetric::Sulfur),
            heat_value: wavg(AssayMetric::HeatValue),
            volatile: wavg(AssayMetric::Volatile),
        }
    }

    /// 按公司名称的发热量加权平均
    pub fn company_heat(&self, records: &[AssayRecord]) -> Vec<CompanyHeatStat> {
        group_by(records, |r| Some(r.company_name.clone()))
            .into_iter()
            .map(|(company, rows)| CompanyHeatStat {
                company,
                total_tonnage: sum(rows.iter().map(|r| r.tonnage)),
                weighted_heat_value: weighted_average(
                    rows.iter().map(|r| (r.heat_value, r.tonnage)),
                ),
            })
            .collect()
    }

    /// 按 (报表月份, 供应商全称) 的加权平均
    pub fn month_supplier_average(
        &self,
        records: &[AssayRecord],
        metric: AssayMetric,
    ) -> Vec<MonthSupplierValue> {
        group_by(records, |r| r.month().map(|m| (m, r.supplier_name.clone())))
            .into_iter()
            .map(|((month, supplier), rows)| MonthSupplierValue {
                month,
                supplier,
                value: weighted_average(rows.iter().map(|r| (r.metric(metric), r.tonnage))),
            })
            .collect()
    }

    /// 按供应商全称的累计加权平均
    pub fn supplier_cumulative_average(
        &self,
        records: &[AssayRecord],
        metric: AssayMetric,
    ) -> Vec<SupplierValue> {
        group_by(records, |r| Some(r.supplier_name.clone()))
            .into_iter()
            .map(|(supplier, rows)| SupplierValue {
                supplier,
                value: weighted_average(rows.iter().map(|r| (r.metric(metric), r.tonnage))),
            })
            .collect()
    }
}
