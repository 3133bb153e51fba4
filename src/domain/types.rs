// ==========================================
// 燃料月报汇总 - 领域类型定义
// ==========================================
// 职责: 报表类型、规范字段名、字段类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 报表类型 (Report Kind)
// ==========================================
// 序列化格式: 与 Web 层约定的短代码 (hy / cz)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReportKind {
    /// 化验月报
    #[serde(rename = "hy")]
    Assay,
    /// 称重月报
    #[serde(rename = "cz")]
    Weighing,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::Assay, ReportKind::Weighing];

    /// 短代码
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Assay => "hy",
            ReportKind::Weighing => "cz",
        }
    }

    /// 中文名称
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportKind::Assay => "化验月报",
            ReportKind::Weighing => "称重月报",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hy" | "assay" | "化验" | "化验月报" => Ok(ReportKind::Assay),
            "cz" | "weighing" | "称重" | "称重月报" => Ok(ReportKind::Weighing),
            other => Err(format!("未知报表类型: {}", other)),
        }
    }
}

// ==========================================
// 字段类型 (Column Kind)
// ==========================================
// 决定抽取时单元格的强制转换方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnKind {
    Integer,
    Number,
    Text,
    Date,
}

// ==========================================
// 规范字段名
// ==========================================
pub mod field {
    // 公共
    pub const SEQ: &str = "序号";
    pub const SUPPLIER: &str = "供应商全称";
    pub const MONTH_SUPPLIER: &str = "报表月份供应商";
    pub const REPORT_MONTH: &str = "报表月份";

    // 化验月报
    pub const COMPANY: &str = "公司名称";
    pub const TONNAGE: &str = "来煤量";
    pub const ASSAY_DATE: &str = "化验日期";
    pub const MOISTURE: &str = "全水Mt";
    pub const ASH: &str = "灰分空干基Aad";
    pub const VOLATILE: &str = "挥发份Vdaf";
    pub const FIXED_CARBON: &str = "固定碳";
    pub const SULFUR: &str = "全硫";
    pub const HEAT_VALUE: &str = "发热量";

    // 称重月报
    pub const SUPPLY_UNIT: &str = "供应单位";
    pub const CARRIER: &str = "运输单位";
    pub const VEHICLES: &str = "车数";
    pub const WEIGHT: &str = "重量";
    pub const WEIGHT_SOURCE: &str = "到厂重量（t）";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_from_str() {
        assert_eq!("hy".parse::<ReportKind>().unwrap(), ReportKind::Assay);
        assert_eq!("CZ".parse::<ReportKind>().unwrap(), ReportKind::Weighing);
        assert_eq!("weighing".parse::<ReportKind>().unwrap(), ReportKind::Weighing);
        assert!("xx".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_report_kind_serde_code() {
        let json = serde_json::to_string(&ReportKind::Assay).unwrap();
        assert_eq!(json, "\"hy\"");
        let kind: ReportKind = serde_json::from_str("\"cz\"").unwrap();
        assert_eq!(kind, ReportKind::Weighing);
    }
}
