// ==========================================
// 燃料月报汇总 - 字段派生服务实现
// ==========================================
// 职责: 供应商全称 / 报表月份 / 报表月份供应商 派生
// ==========================================

use chrono::NaiveDate;
use std::path::Path;

pub struct DerivationService;

impl DerivationService {
    /// 派生供应商全称
    ///
    /// # 规则
    /// - 取第一个左括号（全角 `（` 或半角 `(`）之前的部分，去除首尾空白
    /// - 对已规范的名称再次应用结果不变
    pub fn derive_supplier_name(&self, raw: &str) -> String {
        raw.split(['（', '('])
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    /// 化验日期 → 报表月份 (YYYY-MM)
    pub fn derive_month_from_date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }

    /// 文件名（去扩展名）→ 报表月份 (YYYY-MM)
    ///
    /// # 接受的形式
    /// - 2024-03 / 2024-3 / 2024.03 / 2024/03 / 2024_03
    /// - 202403
    /// - 2024年3月 / 2024年03月
    /// - 2024-03-01 / 20240301
    pub fn derive_month_from_file_name(&self, path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        self.parse_report_month(stem)
    }

    pub fn parse_report_month(&self, text: &str) -> Option<String> {
        let normalized: String = text
            .trim()
            .replace(['年', '.', '/', '_'], "-")
            .replace(['月', '日'], "")
            .trim_end_matches('-')
            .to_string();

        let date = if normalized.chars().all(|c| c.is_ascii_digit()) {
            match normalized.len() {
                6 => NaiveDate::parse_from_str(&format!("{}01", normalized), "%Y%m%d").ok(),
                8 => NaiveDate::parse_from_str(&normalized, "%Y%m%d").ok(),
                _ => None,
            }
        } else {
            match normalized.matches('-').count() {
                1 => NaiveDate::parse_from_str(&format!("{}-01", normalized), "%Y-%m-%d").ok(),
                2 => NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").ok(),
                _ => None,
            }
        }?;

        Some(self.derive_month_from_date(date))
    }

    /// 派生报表月份供应商: `{YYYY-MM}-{供应商全称}`
    pub fn derive_month_supplier_key(&self, month: &str, supplier: &str) -> String {
        format!("{}-{}", month, supplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_name_full_width_paren() {
        let service = DerivationService;
        assert_eq!(service.derive_supplier_name("A（子公司）"), "A");
        assert_eq!(service.derive_supplier_name("B煤业(集团)有限公司"), "B煤业");
        assert_eq!(service.derive_supplier_name("  C能源  "), "C能源");
        assert_eq!(service.derive_supplier_name("D（甲）(乙)"), "D");
        assert_eq!(service.derive_supplier_name(""), "");
    }

    #[test]
    fn test_supplier_name_idempotent() {
        let service = DerivationService;
        for raw in ["A（子公司）", "B", " 山西X煤矿 (二矿)", "(无名)"] {
            let once = service.derive_supplier_name(raw);
            assert_eq!(service.derive_supplier_name(&once), once);
        }
    }

    #[test]
    fn test_report_month_variants() {
        let service = DerivationService;
        for text in [
            "2024-03",
            "2024-3",
            "202403",
            "2024.03",
            "2024/03",
            "2024_03",
            "2024年3月",
            "2024年03月",
            "2024-03-01",
            "20240315",
        ] {
            assert_eq!(
                service.parse_report_month(text).as_deref(),
                Some("2024-03"),
                "输入: {}",
                text
            );
        }
        assert_eq!(service.parse_report_month("三月报表"), None);
        assert_eq!(service.parse_report_month("2024-13"), None);
    }

    #[test]
    fn test_month_from_file_name_strips_extension() {
        let service = DerivationService;
        assert_eq!(
            service
                .derive_month_from_file_name(Path::new("无人值守称重月报/2024-03.xls"))
                .as_deref(),
            Some("2024-03")
        );
    }

    #[test]
    fn test_month_supplier_key() {
        let service = DerivationService;
        assert_eq!(service.derive_month_supplier_key("2024-01", "A"), "2024-01-A");
    }
}
