// ==========================================
// 燃料月报汇总 - 称重月报统计引擎
// ==========================================
// 职责:
// - 按 (报表月份, 供应商全称) 统计 重量 的 合计/平均/最大/最小
// - 按供应商全称统计累计年度供应量
// ==========================================

use crate::domain::WeighingRecord;
use crate::engine::weighted::{group_by, max, mean, min, sum};
use serde::Serialize;

/// 单个 (月份, 供应商) 分组的重量统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplyStat {
    pub month: String,
    pub supplier: String,
    pub total: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierTotal {
    pub supplier: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeighingStatistics {
    pub by_month_supplier: Vec<SupplyStat>,
    pub by_supplier: Vec<SupplierTotal>,
}

pub struct WeighingStatsEngine;

impl WeighingStatsEngine {
    pub fn compute(&self, records: &[WeighingRecord]) -> WeighingStatistics {
        WeighingStatistics {
            by_month_supplier: self.month_supplier_stats(records),
            by_supplier: self.supplier_totals(records),
        }
    }

    pub fn month_supplier_stats(&self, records: &[WeighingRecord]) -> Vec<SupplyStat> {
        group_by(records, |r| {
            if r.report_month.is_empty() {
                None
            } else {
                Some((r.report_month.clone(), r.supplier_name.clone()))
            }
        })
        .into_iter()
        .map(|((month, supplier), rows)| {
            let weights: Vec<Option<f64>> = rows.iter().map(|r| r.weight).collect();
            SupplyStat {
                month,
                supplier,
                total: sum(weights.iter().copied()),
                mean: mean(weights.iter().copied()),
                max: max(weights.iter().copied()),
                min: min(weights.iter().copied()),
            }
        })
        .collect()
    }

    pub fn supplier_totals(&self, records: &[WeighingRecord]) -> Vec<SupplierTotal> {
        group_by(records, |r| Some(r.supplier_name.clone()))
            .into_iter()
            .map(|(supplier, rows)| SupplierTotal {
                supplier,
                total: sum(rows.iter().map(|r| r.weight)),
            })
            .collect()
    }
}
