//! ワークブック書式設定
//!
//! 保存済みのワークブックを読み直し、シートごとに SheetLayout を計算して
//! 書式付きで書き直す。列幅・行高の設定失敗はステップ単位で記録し、
//! 残りのステップ・シートは続行する。罫線・折り返し・中央揃えはセル書式として
//! 値と一緒に書き込む。

use super::workbook::{position, read_workbook, write_cell};
use crate::error::Result;
use coupon_sheet_common::{CellStyle, SheetData, SheetLayout};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::fmt;
use std::path::Path;

/// 書式設定のステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStep {
    /// PC/移动列の幅と折り返し
    SpecialColumns,
    /// データ行の行高と上下中央揃え
    RowHeight,
    /// 通常列の幅
    ColumnWidth,
}

impl fmt::Display for FormatStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatStep::SpecialColumns => write!(f, "特殊列"),
            FormatStep::RowHeight => write!(f, "行高"),
            FormatStep::ColumnWidth => write!(f, "列幅"),
        }
    }
}

/// ステップ単位の失敗
#[derive(Debug, Clone)]
pub struct StepFailure {
    pub sheet: String,
    pub step: FormatStep,
    pub message: String,
}

/// 書式設定の結果
#[derive(Debug, Clone, Default)]
pub struct FormatReport {
    pub sheets: Vec<String>,
    pub failures: Vec<StepFailure>,
}

impl FormatReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, sheet: &str, step: FormatStep, message: impl Into<String>) {
        let failure = StepFailure {
            sheet: sheet.to_string(),
            step,
            message: message.into(),
        };
        log::warn!(
            "書式設定エラー [{}] {}: {}",
            failure.sheet,
            failure.step,
            failure.message
        );
        self.failures.push(failure);
    }
}

/// ワークブックに書式を適用して上書き保存
///
/// 読み込み・保存・セル値の書き込みに失敗した場合はエラーを返し、
/// 元のファイルはそのまま残る。
pub fn apply_formatting(path: &Path) -> Result<FormatReport> {
    let sheets = read_workbook(path)?;
    let mut workbook = Workbook::new();
    let mut report = FormatReport::default();

    for sheet in &sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        format_sheet(worksheet, sheet, &mut report)?;
        report.sheets.push(sheet.name.clone());
    }

    workbook.save(path)?;
    log::debug!("書式設定完了: {} ({}シート)", path.display(), report.sheets.len());
    Ok(report)
}

fn format_sheet(worksheet: &mut Worksheet, sheet: &SheetData, report: &mut FormatReport) -> Result<()> {
    let layout = SheetLayout::for_sheet(sheet);
    if layout.max_row == 0 {
        return Ok(());
    }

    // 1-2. 特殊列: 固定幅（折り返しはセル書式で付与）
    for col in layout.special.columns() {
        let width = layout.column_widths[&col];
        if let Err(e) = set_column_width(worksheet, col, width) {
            report.record(&sheet.name, FormatStep::SpecialColumns, e);
        }
    }

    // 3. データ行の行高
    for (&row, &height) in &layout.row_heights {
        let result = position(row, 0)
            .map_err(|e| e.to_string())
            .and_then(|(r, _)| {
                worksheet
                    .set_row_height(r, height)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            report.record(&sheet.name, FormatStep::RowHeight, format!("{}行目: {}", row + 1, e));
        }
    }

    // 4. 通常列の幅
    for (&col, &width) in layout
        .column_widths
        .iter()
        .filter(|(col, _)| !layout.special.contains(**col))
    {
        if let Err(e) = set_column_width(worksheet, col, width) {
            report.record(&sheet.name, FormatStep::ColumnWidth, e);
        }
    }

    // 5. 値 + 折り返し・中央揃え・罫線
    let formats = StyleFormats::new();
    for row in 0..layout.max_row {
        for col in 0..layout.max_column {
            let format = formats.get(layout.cell_style(row, col));
            write_cell(worksheet, row, col, sheet.cell(row, col), format)?;
        }
    }

    Ok(())
}

fn set_column_width(worksheet: &mut Worksheet, col: usize, width: f64) -> std::result::Result<(), String> {
    let (_, c) = position(0, col).map_err(|e| e.to_string())?;
    worksheet
        .set_column_width(c, width)
        .map(|_| ())
        .map_err(|e| format!("{}列目: {}", col + 1, e))
}

/// CellStyle の全組み合わせ分の Format を事前生成
struct StyleFormats {
    formats: Vec<Format>,
}

impl StyleFormats {
    fn new() -> Self {
        let formats = (0..16u8)
            .map(|bits| {
                Self::build(CellStyle {
                    header: bits & 1 != 0,
                    wrap: bits & 2 != 0,
                    vertical_center: bits & 4 != 0,
                    border: bits & 8 != 0,
                })
            })
            .collect();
        Self { formats }
    }

    fn index(style: CellStyle) -> usize {
        (style.header as usize)
            | (style.wrap as usize) << 1
            | (style.vertical_center as usize) << 2
            | (style.border as usize) << 3
    }

    fn get(&self, style: CellStyle) -> &Format {
        &self.formats[Self::index(style)]
    }

    fn build(style: CellStyle) -> Format {
        let mut format = Format::new();
        if style.header {
            format = format.set_bold().set_align(FormatAlign::Center);
        }
        if style.wrap {
            format = format.set_text_wrap();
        }
        if style.vertical_center {
            format = format.set_align(FormatAlign::VerticalCenter);
        }
        if style.border {
            format = format.set_border(FormatBorder::Thin);
        }
        format
    }
}
