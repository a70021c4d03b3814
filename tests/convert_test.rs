//! JSON → Excel 変換の統合テスト

use coupon_sheet::error::CouponSheetError;
use coupon_sheet::export::{convert, workbook::read_workbook};
use coupon_sheet_common::CellValue;
use std::path::Path;
use tempfile::tempdir;

fn s(text: &str) -> CellValue {
    CellValue::String(text.to_string())
}

fn write_json(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("JSON書き込み失敗");
    path
}

#[test]
fn test_two_sheet_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json = write_json(dir.path(), "t.json", r#"{"A": [{"x":1}], "B": [{"y":2},{"y":3}]}"#);
    let xlsx = dir.path().join("out.xlsx");

    convert(&json, &xlsx).expect("変換に失敗");
    let sheets = read_workbook(&xlsx).expect("読み込みに失敗");

    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].name, "A");
    assert_eq!(sheets[0].rows, vec![vec![s("x")], vec![CellValue::Number(1.0)]]);
    assert_eq!(sheets[1].name, "B");
    assert_eq!(
        sheets[1].rows,
        vec![vec![s("y")], vec![CellValue::Number(2.0)], vec![CellValue::Number(3.0)]]
    );
}

#[test]
fn test_sheet_order_follows_document() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json = write_json(
        dir.path(),
        "t.json",
        r#"{"淘宝": [{"名称": "a"}], "京东": [{"名称": "b"}], "活动": [{"名称": "c"}]}"#,
    );
    let xlsx = dir.path().join("out.xlsx");

    convert(&json, &xlsx).expect("変換に失敗");
    let names: Vec<String> = read_workbook(&xlsx)
        .expect("読み込みに失敗")
        .into_iter()
        .map(|s| s.name)
        .collect();

    assert_eq!(names, vec!["淘宝", "京东", "活动"]);
}

#[test]
fn test_coupon_columns() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json = write_json(
        dir.path(),
        "t.json",
        r#"{"京东": [
            {"名称": "满100减10", "PC": "https://pc/1", "移动": "https://m/1"},
            {"名称": "满200减30", "PC": "https://pc/2", "备注": "限新用户"}
        ]}"#,
    );
    let xlsx = dir.path().join("out.xlsx");

    convert(&json, &xlsx).expect("変換に失敗");
    let sheet = &read_workbook(&xlsx).expect("読み込みに失敗")[0];

    assert_eq!(sheet.header(), &[s("名称"), s("PC"), s("移动"), s("备注")]);
    assert_eq!(sheet.cell(1, 3), &CellValue::Empty);
    assert_eq!(sheet.cell(2, 2), &CellValue::Empty);
    assert_eq!(sheet.cell(2, 3), &s("限新用户"));
}

#[test]
fn test_missing_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let xlsx = dir.path().join("out.xlsx");

    let result = convert(&dir.path().join("none.json"), &xlsx);
    assert!(matches!(result, Err(CouponSheetError::TemplateNotFound(_))));
    assert!(!xlsx.exists());
}

#[test]
fn test_malformed_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json = write_json(dir.path(), "bad.json", r#"{"A": [{"x": 1}"#);
    let xlsx = dir.path().join("out.xlsx");

    let result = convert(&json, &xlsx);
    assert!(matches!(result, Err(CouponSheetError::JsonParse(_))));
    assert!(!xlsx.exists());
}

#[test]
fn test_invalid_shape() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json = write_json(dir.path(), "shape.json", r#"{"A": {"x": 1}}"#);
    let xlsx = dir.path().join("out.xlsx");

    let result = convert(&json, &xlsx);
    assert!(matches!(result, Err(CouponSheetError::InvalidTemplate(_))));
}
