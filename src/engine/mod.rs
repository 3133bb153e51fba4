// ==========================================
// 燃料月报汇总 - 统计引擎层
// ==========================================
// 职责: 在类型化记录上计算分组汇总，不做任何 IO
// ==========================================

pub mod assay_stats;
pub mod weighing_stats;
pub mod weighted;

pub use assay_stats::{
    AssayStatistics, AssayStatsEngine, CompanyHeatStat, MonthSupplierValue, MonthlyAssayStat,
    SupplierValue, ANNUAL_LABEL,
};
pub use weighing_stats::{SupplierTotal, SupplyStat, WeighingStatistics, WeighingStatsEngine};
pub use weighted::{group_by, weighted_average};
