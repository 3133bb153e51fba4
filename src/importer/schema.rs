// ==========================================
// 燃料月报汇总 - 列清单 (Schema Manifest)
// ==========================================
// 职责: 声明 源列 → 规范字段名 + 字段类型 的有序映射，并按清单抽取数据
// 说明:
// - 按位置抽取前先校验工作表宽度，不足时立即报错，避免错位映射
// - 按表头抽取时在表头行查找候选列名（别名），缺失的可选列不进入结果表
// ==========================================

use crate::domain::{field, CellValue, ColumnKind, TidyTable};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawSheet, SheetLayout};
use serde::{Deserialize, Serialize};

/// 源列定位方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSource {
    /// 按列序号（从 0 开始）
    Position(usize),
    /// 按表头文本（任一候选匹配即可）
    Header(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub source: ColumnSource,
    pub name: String,
    pub kind: ColumnKind,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl ColumnSpec {
    pub fn at(position: usize, name: &str, kind: ColumnKind) -> Self {
        Self {
            source: ColumnSource::Position(position),
            name: name.to_string(),
            kind,
            required: true,
        }
    }

    pub fn header(candidates: &[&str], name: &str, kind: ColumnKind, required: bool) -> Self {
        Self {
            source: ColumnSource::Header(candidates.iter().map(|s| s.to_string()).collect()),
            name: name.to_string(),
            kind,
            required,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaManifest {
    pub columns: Vec<ColumnSpec>,
}

impl SchemaManifest {
    /// 化验月报: 固定列位置
    pub fn assay() -> Self {
        Self {
            columns: vec![
                ColumnSpec::at(0, field::SEQ, ColumnKind::Integer),
                ColumnSpec::at(1, field::COMPANY, ColumnKind::Text),
                ColumnSpec::at(2, field::TONNAGE, ColumnKind::Number),
                ColumnSpec::at(3, field::ASSAY_DATE, ColumnKind::Date),
                ColumnSpec::at(4, field::MOISTURE, ColumnKind::Number),
                ColumnSpec::at(6, field::ASH, ColumnKind::Number),
                ColumnSpec::at(9, field::VOLATILE, ColumnKind::Number),
                ColumnSpec::at(10, field::FIXED_CARBON, ColumnKind::Number),
                ColumnSpec::at(11, field::SULFUR, ColumnKind::Number),
                ColumnSpec::at(13, field::HEAT_VALUE, ColumnKind::Number),
            ],
        }
    }

    /// 称重月报: 按表头定位（到厂重量列重命名为 重量）
    pub fn weighing() -> Self {
        Self {
            columns: vec![
                ColumnSpec::header(&[field::SEQ], field::SEQ, ColumnKind::Integer, false),
                ColumnSpec::header(&[field::SUPPLY_UNIT], field::SUPPLY_UNIT, ColumnKind::Text, true),
                ColumnSpec::header(&[field::CARRIER], field::CARRIER, ColumnKind::Text, false),
                ColumnSpec::header(&[field::VEHICLES], field::VEHICLES, ColumnKind::Number, false),
                ColumnSpec::header(
                    &[field::WEIGHT_SOURCE, "到厂重量(t)", "到厂重量", field::WEIGHT],
                    field::WEIGHT,
                    ColumnKind::Number,
                    false,
                ),
            ],
        }
    }

    /// 按位置映射所需的最小宽度
    pub fn required_width(&self) -> usize {
        self.columns
            .iter()
            .filter_map(|c| match c.source {
                ColumnSource::Position(p) => Some(p + 1),
                ColumnSource::Header(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// 按清单从工作表抽取整洁表
    pub fn extract(&self, sheet: &RawSheet, layout: &SheetLayout) -> ImportResult<TidyTable> {
        let cleaner = DataCleaner;
        let width = sheet.width();

        // 1. 解析每个规范字段对应的源列
        let headers: Vec<String> = sheet
            .row(layout.header_row())
            .iter()
            .map(|c| cleaner.clean_text(&c.to_string()))
            .collect();

        let mut resolved: Vec<(&ColumnSpec, usize)> = Vec::with_capacity(self.columns.len());
        for spec in &self.columns {
            match &spec.source {
                ColumnSource::Position(p) => {
                    if *p >= width {
                        return Err(ImportError::SchemaMismatch {
                            field: spec.name.clone(),
                            column: *p,
                            required: self.required_width(),
                            actual: width,
                        });
                    }
                    resolved.push((spec, *p));
                }
                ColumnSource::Header(candidates) => {
                    let found = candidates
                        .iter()
                        .find_map(|cand| headers.iter().position(|h| h == cand.trim()));
                    match found {
                        Some(idx) => resolved.push((spec, idx)),
                        None if spec.required => {
                            return Err(ImportError::MissingHeader {
                                field: spec.name.clone(),
                                candidates: candidates.clone(),
                                headers: headers.iter().filter(|h| !h.is_empty()).cloned().collect(),
                            });
                        }
                        None => {
                            tracing::debug!(field = %spec.name, "表头中无此列，跳过");
                        }
                    }
                }
            }
        }

        // 2. 逐行抽取并转换
        let mut table = TidyTable::new(resolved.iter().map(|(spec, _)| spec.name.clone()));
        for row_idx in layout.data_rows(sheet) {
            let row: Vec<CellValue> = resolved
                .iter()
                .map(|(spec, col)| cleaner.coerce(sheet.cell(row_idx, *col), spec.kind))
                .collect();
            table.push_row(row);
        }

        Ok(table)
    }
}
