// ==========================================
// 燃料月报汇总 - 工作表规范化实现
// ==========================================
// 职责: 按列清单抽取 + 派生 供应商全称 / 报表月份 / 报表月份供应商
// ==========================================

use crate::domain::{field, CellValue, ReportKind, TidyTable};
use crate::importer::derivation::DerivationService;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawSheet, SheetLayout};
use crate::importer::report_importer_trait::SheetNormalizer;
use crate::importer::schema::SchemaManifest;
use std::path::Path;

// ==========================================
// 化验月报
// ==========================================
pub struct AssayNormalizer {
    manifest: SchemaManifest,
    layout: SheetLayout,
}

impl AssayNormalizer {
    pub fn new(manifest: SchemaManifest, layout: SheetLayout) -> Self {
        Self { manifest, layout }
    }
}

impl Default for AssayNormalizer {
    fn default() -> Self {
        Self::new(SchemaManifest::assay(), SheetLayout::default())
    }
}

impl SheetNormalizer for AssayNormalizer {
    fn kind(&self) -> ReportKind {
        ReportKind::Assay
    }

    fn normalize(&self, _path: &Path, sheet: &RawSheet) -> ImportResult<TidyTable> {
        let derivation = DerivationService;
        let mut table = self.manifest.extract(sheet, &self.layout)?;

        let company_idx = table.column_index(field::COMPANY);
        let date_idx = table.column_index(field::ASSAY_DATE);

        let mut suppliers = Vec::with_capacity(table.len());
        let mut keys = Vec::with_capacity(table.len());
        for row in table.rows() {
            let company = company_idx
                .map(|i| row[i].to_string())
                .unwrap_or_default();
            let supplier = derivation.derive_supplier_name(&company);

            // 化验日期无法解析时，报表月份供应商置空
            let key = date_idx
                .and_then(|i| row[i].as_date())
                .map(|d| {
                    let month = derivation.derive_month_from_date(d);
                    CellValue::Text(derivation.derive_month_supplier_key(&month, &supplier))
                })
                .unwrap_or(CellValue::Empty);

            suppliers.push(CellValue::Text(supplier));
            keys.push(key);
        }

        table.add_column(field::SUPPLIER, suppliers);
        table.add_column(field::MONTH_SUPPLIER, keys);
        Ok(table)
    }
}

// ==========================================
// 称重月报
// ==========================================
pub struct WeighingNormalizer {
    manifest: SchemaManifest,
    layout: SheetLayout,
}

impl WeighingNormalizer {
    pub fn new(manifest: SchemaManifest, layout: SheetLayout) -> Self {
        Self { manifest, layout }
    }
}

impl Default for WeighingNormalizer {
    fn default() -> Self {
        Self::new(SchemaManifest::weighing(), SheetLayout::default())
    }
}

impl SheetNormalizer for WeighingNormalizer {
    fn kind(&self) -> ReportKind {
        ReportKind::Weighing
    }

    fn normalize(&self, path: &Path, sheet: &RawSheet) -> ImportResult<TidyTable> {
        let derivation = DerivationService;

        // 报表月份来自文件名（去扩展名）
        let month = derivation.derive_month_from_file_name(path).ok_or_else(|| {
            ImportError::InvalidReportMonth(
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            )
        })?;

        let mut table = self.manifest.extract(sheet, &self.layout)?;
        let unit_idx = table.column_index(field::SUPPLY_UNIT);

        let mut suppliers = Vec::with_capacity(table.len());
        let mut keys = Vec::with_capacity(table.len());
        for row in table.rows() {
            let supplier = unit_idx
                .map(|i| derivation.derive_supplier_name(&row[i].to_string()))
                .unwrap_or_default();
            keys.push(CellValue::Text(
                derivation.derive_month_supplier_key(&month, &supplier),
            ));
            suppliers.push(CellValue::Text(supplier));
        }

        let months = vec![CellValue::Text(month.clone()); table.len()];
        table.add_column(field::REPORT_MONTH, months);
        table.add_column(field::SUPPLIER, suppliers);
        table.add_column(field::MONTH_SUPPLIER, keys);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn assay_row(seq: f64, company: &str, tonnage: f64, date: &str, heat: f64) -> Vec<CellValue> {
        let mut row = vec![CellValue::Empty; 14];
        row[0] = CellValue::Number(seq);
        row[1] = text(company);
        row[2] = CellValue::Number(tonnage);
        row[3] = text(date);
        row[13] = CellValue::Number(heat);
        row
    }

    fn assay_sheet(data: Vec<Vec<CellValue>>) -> RawSheet {
        let mut rows = vec![vec![text("化验月报")], vec![text("2024年1月")], vec![text("表头"); 14]];
        rows.extend(data);
        rows.push(vec![text("合计")]);
        RawSheet::from_rows(rows)
    }

    #[test]
    fn test_assay_normalize_derives_supplier_and_key() {
        let sheet = assay_sheet(vec![
            assay_row(1.0, "A（子公司）", 100.0, "2024-01-05", 5000.0),
            assay_row(2.0, "B", 300.0, "2024-01-20", 6000.0),
        ]);
        let table = AssayNormalizer::default()
            .normalize(Path::new("hy.xlsx"), &sheet)
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, field::SUPPLIER), Some(&text("A")));
        assert_eq!(table.get(1, field::SUPPLIER), Some(&text("B")));
        assert_eq!(table.get(0, field::MONTH_SUPPLIER), Some(&text("2024-01-A")));
        assert_eq!(
            table.get(0, field::ASSAY_DATE),
            Some(&CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()))
        );
    }

    #[test]
    fn test_assay_unparseable_date_leaves_key_empty() {
        let sheet = assay_sheet(vec![assay_row(1.0, "A", 100.0, "待定", 5000.0)]);
        let table = AssayNormalizer::default()
            .normalize(Path::new("hy.xlsx"), &sheet)
            .unwrap();
        assert_eq!(table.get(0, field::MONTH_SUPPLIER), Some(&CellValue::Empty));
        assert_eq!(table.get(0, field::SUPPLIER), Some(&text("A")));
    }

    #[test]
    fn test_weighing_month_from_file_name() {
        let sheet = RawSheet::from_rows(vec![
            vec![text("称重月报")],
            vec![text("")],
            vec![text("序号"), text("供应单位"), text("到厂重量（t）")],
            vec![CellValue::Number(1.0), text("甲（一矿）"), CellValue::Number(30.0)],
            vec![CellValue::Number(2.0), text("乙"), CellValue::Number(40.0)],
            vec![text("合计"), CellValue::Empty, CellValue::Number(70.0)],
        ]);
        let table = WeighingNormalizer::default()
            .normalize(Path::new("dir/2024-03.xls"), &sheet)
            .unwrap();

        assert_eq!(table.len(), 2);
        for row in 0..2 {
            assert_eq!(table.get(row, field::REPORT_MONTH), Some(&text("2024-03")));
        }
        assert_eq!(table.get(0, field::MONTH_SUPPLIER), Some(&text("2024-03-甲")));
    }

    #[test]
    fn test_weighing_bad_file_name() {
        let sheet = RawSheet::default();
        let err = WeighingNormalizer::default()
            .normalize(Path::new("dir/月报.xls"), &sheet)
            .unwrap_err();
        assert!(matches!(err, ImportError::InvalidReportMonth(ref f) if f == "月报.xls"));
    }
}
