//! シート書式レイアウト
//!
//! シートの値だけから書式（列幅・折り返し・行高・罫線）を決める。
//! 値が同じなら結果も同じになるので、書式の再適用は不動点になる。

use crate::types::{CellValue, SheetData};
use crate::width::fit_column_width;
use std::collections::BTreeMap;

/// PC列のヘッダー
pub const PC_HEADER: &str = "PC";
/// 移动列のヘッダー
pub const MOBILE_HEADER: &str = "移动";

/// 特殊列（PC/移动）の固定幅
pub const SPECIAL_COLUMN_WIDTH: f64 = 28.0;
/// データ行（2行目以降）の行高
pub const DATA_ROW_HEIGHT: f64 = 78.0;
/// 通常列の最小幅
pub const MIN_COLUMN_WIDTH: usize = 10;
/// 通常列の余白
pub const COLUMN_PADDING: usize = 2;

/// 特殊列の位置（0始まり）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialColumns {
    pub pc: Option<usize>,
    pub mobile: Option<usize>,
}

impl SpecialColumns {
    /// ヘッダー行を左から走査して特殊列を探す
    ///
    /// 同じヘッダーが複数ある場合は後のものが優先される（上書き）。
    pub fn detect(header: &[CellValue]) -> Self {
        let mut found = Self::default();
        for (col, cell) in header.iter().enumerate() {
            match cell.as_str() {
                Some(PC_HEADER) => found.pc = Some(col),
                Some(MOBILE_HEADER) => found.mobile = Some(col),
                _ => {}
            }
        }
        found
    }

    pub fn contains(&self, col: usize) -> bool {
        self.pc == Some(col) || self.mobile == Some(col)
    }

    pub fn columns(&self) -> impl Iterator<Item = usize> {
        self.pc.into_iter().chain(self.mobile)
    }
}

/// セル単位の書式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub header: bool,
    pub wrap: bool,
    pub vertical_center: bool,
    pub border: bool,
}

/// 1シート分の書式計画
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetLayout {
    pub max_row: usize,
    pub max_column: usize,
    pub special: SpecialColumns,
    /// 列番号（0始まり）→ 列幅
    pub column_widths: BTreeMap<usize, f64>,
    /// 行番号（0始まり）→ 行高
    pub row_heights: BTreeMap<usize, f64>,
}

impl SheetLayout {
    pub fn for_sheet(sheet: &SheetData) -> Self {
        if sheet.is_empty() {
            return Self::default();
        }

        let max_row = sheet.row_count();
        let max_column = sheet.column_count();
        let special = SpecialColumns::detect(sheet.header());

        let mut column_widths = BTreeMap::new();
        for col in special.columns() {
            column_widths.insert(col, SPECIAL_COLUMN_WIDTH);
        }
        for col in (0..max_column).filter(|c| !special.contains(*c)) {
            let width = fit_column_width((0..max_row).map(|row| sheet.cell(row, col)));
            column_widths.insert(col, width as f64);
        }

        let row_heights = (1..max_row).map(|row| (row, DATA_ROW_HEIGHT)).collect();

        Self {
            max_row,
            max_column,
            special,
            column_widths,
            row_heights,
        }
    }

    /// 罫線対象範囲（1..max_row × 1..max_column）に含まれるか
    pub fn in_range(&self, row: usize, col: usize) -> bool {
        row < self.max_row && col < self.max_column
    }

    pub fn cell_style(&self, row: usize, col: usize) -> CellStyle {
        if !self.in_range(row, col) {
            return CellStyle::default();
        }
        CellStyle {
            header: row == 0,
            wrap: self.special.contains(col),
            vertical_center: row >= 1,
            border: true,
        }
    }
}
