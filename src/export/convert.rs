//! JSON → Excel 変換

use super::workbook::write_workbook;
use crate::error::{CouponSheetError, Result};
use coupon_sheet_common::parse_catalog;
use std::path::Path;

/// カタログJSONを読み込み、キーごとに1シートのワークブックを書き出す
pub fn convert(json_path: &Path, output_path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(json_path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            CouponSheetError::TemplateNotFound(json_path.display().to_string())
        }
        _ => CouponSheetError::Io(e),
    })?;

    let value: serde_json::Value = serde_json::from_str(&content)?;
    let sheets = parse_catalog(&value)?;

    write_workbook(&sheets, output_path)?;
    log::debug!(
        "変換完了: {} → {} ({}シート)",
        json_path.display(),
        output_path.display(),
        sheets.len()
    );
    Ok(())
}
