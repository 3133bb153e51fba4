// ==========================================
// 称重月报汇总 集成测试
// ==========================================
// 测试目标: 文件名 → 报表月份、表头定位、列缺失中止、空目录
// ==========================================


use fuel_report::domain::{field, CellValue};
use fuel_report::importer::{ExcelParser, RawSheet};
use fuel_report::{run_weighing_report, NoopSink, ProgressEvent, ReportError, ReportKind};
use std::path::Path;
use test_helpers::*;

fn read_sheets(path: &Path) -> Vec<(String, RawSheet)> {
    ExcelParser.parse_all_sheets(path).unwrap()
}

fn column(sheet: &RawSheet, header: &str) -> usize {
    sheet
        .row(0)
        .iter()
        .position(|c| c.to_string() == header)
        .unwrap_or_else(|| panic!("missing column {header}"))
}

#[test]
fn test_month_from_file_name_and_row_count() {
    let env = TestEnv::new().unwrap();
    write_weighing_report(
        &env.weighing_file("2024-03.xlsx"),
        &[
            (1, "甲煤业（一矿）", "顺达物流", 1.0, 30.0),
            (2, "乙煤业", "顺达物流", 1.0, 40.0),
        ],
    )
    .unwrap();

    let summary = run_weighing_report(&env.config, &NoopSink).unwrap();
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.workbooks.len(), 2);

    let primary = read_sheets(&env.config.primary_output_path(ReportKind::Weighing));
    assert_eq!(primary.len(), 1);
    let merged = &primary[0].1;
    let headers: Vec<String> = merged.row(0).iter().map(|c| c.to_string()).collect();
    assert_eq!(
        headers,
        vec!["序号", "报表月份", "供应单位", "供应商全称", "报表月份供应商", "运输单位", "车数", "重量"]
    );
    assert_eq!(merged.height(), 3);

    let month_col = column(merged, field::REPORT_MONTH);
    for row in 1..=2 {
        assert_eq!(merged.cell(row, month_col), &CellValue::Text("2024-03".into()));
    }
    let key_col = column(merged, field::MONTH_SUPPLIER);
    assert_eq!(
        merged.cell(1, key_col),
        &CellValue::Text("2024-03-甲煤业".into())
    );
    let weight_col = column(merged, field::WEIGHT);
    assert_eq!(merged.cell(2, weight_col).as_f64(), Some(40.0));
}

#[test]
fn test_classified_supply_statistics() {
    let env = TestEnv::new().unwrap();
    write_weighing_report(
        &env.weighing_file("月报.xlsx"),
        &[(1, "甲", "A", 1.0, 1.0)],
    )
    .unwrap();
    write_weighing_report(
        &env.weighing_file("202402.xlsx"),
        &[
            (1, "甲（一矿）", "A", 1.0, 30.0),
            (2, "甲（二矿）", "A", 1.0, 50.0),
            (3, "乙", "B", 2.0, 40.0),
        ],
    )
    .unwrap();
    write_weighing_report(
        &env.weighing_file("2024-03.xlsx"),
        &[(1, "甲", "A", 1.0, 20.0)],
    )
    .unwrap();

    let summary = run_weighing_report(&env.config, &NoopSink).unwrap();
    // 无法解析月份的文件被跳过
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.rows, 4);

    let classified = read_sheets(&env.config.classified_output_path(ReportKind::Weighing));
    let names: Vec<&str> = classified.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["合并数据", "月度供应量", "累计年度供应量", "平均供应量", "最大供应量", "最小供应量"]
    );

    // 月度供应量: (2024-02, 乙) (2024-02, 甲) (2024-03, 甲)
    let monthly = &classified[1].1;
    assert_eq!(monthly.height(), 4);
    assert_eq!(monthly.cell(2, 0), &CellValue::Text("2024-02".into()));
    assert_eq!(monthly.cell(2, 1), &CellValue::Text("甲".into()));
    assert_eq!(monthly.cell(2, 2).as_f64(), Some(80.0));

    let cumulative = &classified[2].1;
    assert_eq!(cumulative.cell(2, 0), &CellValue::Text("甲".into()));
    assert_eq!(cumulative.cell(2, 1).as_f64(), Some(100.0));

    assert_eq!(classified[3].1.cell(2, 2).as_f64(), Some(40.0));
    assert_eq!(classified[4].1.cell(2, 2).as_f64(), Some(50.0));
    assert_eq!(classified[5].1.cell(2, 2).as_f64(), Some(30.0));
}

#[test]
fn test_missing_column_in_every_file_aborts() {
    let env = TestEnv::new().unwrap();
    // 没有 车数 列
    write_report(
        &env.weighing_file("2024-03.xlsx"),
        "无人值守称重月报",
        &["序号", "供应单位", "运输单位", "到厂重量（t）"],
        &[vec![n(1.0), s("甲"), s("A"), n(30.0)]],
    )
    .unwrap();

    let sink = CollectingSink::default();
    let err = run_weighing_report(&env.config, &sink).unwrap_err();

    match err {
        ReportError::MissingColumn { column, available } => {
            assert_eq!(column, "车数");
            assert!(available.contains(&"重量".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!env.config.primary_output_path(ReportKind::Weighing).exists());
    assert!(!env.config.classified_output_path(ReportKind::Weighing).exists());
    assert!(matches!(
        sink.events().last(),
        Some(ProgressEvent::JobFailed { .. })
    ));
}

#[test]
fn test_weight_header_alias() {
    let env = TestEnv::new().unwrap();
    write_report(
        &env.weighing_file("2024-04.xlsx"),
        "无人值守称重月报",
        &["序号", "供应单位", "运输单位", "车数", "到厂重量(t)"],
        &[vec![n(1.0), s("丙"), s("C"), n(1.0), n(33.5)]],
    )
    .unwrap();

    run_weighing_report(&env.config, &NoopSink).unwrap();

    let primary = read_sheets(&env.config.primary_output_path(ReportKind::Weighing));
    let merged = &primary[0].1;
    assert_eq!(merged.cell(1, column(merged, field::WEIGHT)).as_f64(), Some(33.5));
}

#[test]
fn test_empty_directory_writes_nothing() {
    let env = TestEnv::new().unwrap();
    let sink = CollectingSink::default();

    let summary = run_weighing_report(&env.config, &sink).unwrap();

    assert!(summary.workbooks.is_empty());
    assert_eq!(summary.rows, 0);
    assert!(!env.config.primary_output_path(ReportKind::Weighing).exists());
    assert!(sink
        .events()
        .iter()
        .any(|e| matches!(e, ProgressEvent::NoProcessableFiles { kind: ReportKind::Weighing, .. })));
}

#[test]
fn test_rerun_overwrites_workbooks() {
    let env = TestEnv::new().unwrap();
    let file = env.weighing_file("2024-03.xlsx");
    write_weighing_report(
        &file,
        &[(1, "甲", "A", 1.0, 30.0), (2, "乙", "B", 1.0, 40.0)],
    )
    .unwrap();
    run_weighing_report(&env.config, &NoopSink).unwrap();

    write_weighing_report(&file, &[(1, "甲", "A", 1.0, 30.0)]).unwrap();
    run_weighing_report(&env.config, &NoopSink).unwrap();

    let primary = read_sheets(&env.config.primary_output_path(ReportKind::Weighing));
    assert_eq!(primary[0].1.height(), 2);
}
