//! ワークブックの読み書き
//!
//! 読み込みは calamine（値のみ）、書き込みは rust_xlsxwriter。

use crate::error::{CouponSheetError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use coupon_sheet_common::{CellValue, SheetData};
use rust_xlsxwriter::{ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet};
use std::path::Path;

/// ヘッダー行の書式（太字・中央揃え・細罫線）
pub fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
}

/// データ行の空セル用（空白セルは書式がないと書き込まれない）
pub fn blank_format() -> Format {
    Format::new().set_border(FormatBorder::Thin)
}

/// シート一覧をワークブックとして保存（書式はヘッダーのみ）
///
/// データ行の空セルは罫線付きの空白として書き込み、値がすべて空の行も
/// シートの範囲に含める。
pub fn write_workbook(sheets: &[SheetData], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = header_format();
    let plain = Format::new();
    let blank = blank_format();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (row, cells) in sheet.rows.iter().enumerate() {
            for (col, value) in cells.iter().enumerate() {
                let format = match (row, value.is_empty()) {
                    (0, true) => continue,
                    (0, false) => &header,
                    (_, true) => &blank,
                    (_, false) => &plain,
                };
                write_cell(worksheet, row, col, value, format)?;
            }
        }
    }

    workbook.save(output_path)?;
    Ok(())
}

/// ワークブックを読み込み、シート順に値を返す
pub fn read_workbook(path: &Path) -> Result<Vec<SheetData>> {
    if !path.exists() {
        return Err(CouponSheetError::ExcelRead(format!(
            "ファイルが見つかりません: {}",
            path.display()
        )));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let mut sheets = Vec::new();

    for name in workbook.sheet_names() {
        // 書式付き空白セルは range に入らないため、シートの寸法で補う
        let dimensions = workbook.worksheet_cells_reader(&name)?.dimensions();
        let range = workbook.worksheet_range(&name)?;
        let mut sheet = SheetData::new(name);

        if let (Some(start), Some(end)) = (range.start(), range.end()) {
            // A1 起点のグリッドに展開（先頭の空行・空列も位置を保つ）
            let height = end.0.max(dimensions.end.0) as usize + 1;
            let width = end.1.max(dimensions.end.1) as usize + 1;
            sheet.rows = vec![vec![CellValue::Empty; width]; height];

            for (r, row) in range.rows().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    sheet.rows[start.0 as usize + r][start.1 as usize + c] = cell_value(cell);
                }
            }
        }

        sheets.push(sheet);
    }

    Ok(sheets)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        other => CellValue::String(format!("{:?}", other)),
    }
}

/// 0始まりの行列番号を rust_xlsxwriter の型に変換
pub fn position(row: usize, col: usize) -> Result<(RowNum, ColNum)> {
    let row = RowNum::try_from(row)
        .map_err(|_| CouponSheetError::ExcelGeneration(format!("行番号が範囲外: {}", row)))?;
    let col = ColNum::try_from(col)
        .map_err(|_| CouponSheetError::ExcelGeneration(format!("列番号が範囲外: {}", col)))?;
    Ok((row, col))
}

/// 値の型に応じてセルを書き込む（空セルは書式付きの空白）
pub fn write_cell(
    worksheet: &mut Worksheet,
    row: usize,
    col: usize,
    value: &CellValue,
    format: &Format,
) -> Result<()> {
    let (row, col) = position(row, col)?;
    match value {
        CellValue::Empty => worksheet.write_blank(row, col, format)?,
        CellValue::String(s) => worksheet.write_string_with_format(row, col, s, format)?,
        CellValue::Number(n) => worksheet.write_number_with_format(row, col, *n, format)?,
        CellValue::Bool(b) => worksheet.write_boolean_with_format(row, col, *b, format)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn s(text: &str) -> CellValue {
        CellValue::String(text.to_string())
    }

    #[test]
    fn test_write_and_read_values() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("values.xlsx");

        let sheet = SheetData {
            name: "券".into(),
            rows: vec![
                vec![s("名称"), s("金额"), s("有效")],
                vec![s("满100减10"), CellValue::Number(10.0), CellValue::Bool(true)],
                vec![s("满200减30"), CellValue::Number(30.5), CellValue::Empty],
            ],
        };

        write_workbook(std::slice::from_ref(&sheet), &path).expect("書き込み失敗");
        let sheets = read_workbook(&path).expect("読み込み失敗");

        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].name, "券");
        assert_eq!(sheets[0].cell(1, 0), &s("满100减10"));
        assert_eq!(sheets[0].cell(1, 1), &CellValue::Number(10.0));
        assert_eq!(sheets[0].cell(1, 2), &CellValue::Bool(true));
        assert_eq!(sheets[0].cell(2, 1), &CellValue::Number(30.5));
        assert_eq!(sheets[0].cell(2, 2), &CellValue::Empty);
    }

    #[test]
    fn test_trailing_empty_row_is_kept() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("blank.xlsx");

        let sheet = SheetData {
            name: "A".into(),
            rows: vec![
                vec![s("x"), s("PC")],
                vec![CellValue::Number(1.0), s("u")],
                vec![CellValue::Empty, CellValue::Empty],
            ],
        };

        write_workbook(std::slice::from_ref(&sheet), &path).expect("書き込み失敗");
        let sheets = read_workbook(&path).expect("読み込み失敗");

        assert_eq!(sheets[0].row_count(), 3, "空行が範囲から落ちている");
        assert_eq!(sheets[0].column_count(), 2);
        assert_eq!(sheets[0].cell(2, 0), &CellValue::Empty);
        assert_eq!(sheets[0].cell(2, 1), &CellValue::Empty);
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_workbook(Path::new("/nonexistent/book.xlsx"));
        assert!(matches!(result, Err(CouponSheetError::ExcelRead(_))));
    }

    #[test]
    fn test_invalid_sheet_name() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("bad.xlsx");
        let sheet = SheetData::new("bad/name[1]");

        let result = write_workbook(&[sheet], &path);
        assert!(matches!(result, Err(CouponSheetError::ExcelGeneration(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_position_out_of_range() {
        assert!(position(0, 70_000).is_err());
        assert!(position(10, 3).is_ok());
    }
}
