//! 列幅計算
//!
//! 全角判定は簡易ヒューリスティック: ASCII範囲を1、それ以外を2として数える。
//! 正確な表示幅（East Asian Width）ではないが、既存の出力と揃えるためこのまま使う。

use crate::layout::{COLUMN_PADDING, MIN_COLUMN_WIDTH};
use crate::types::CellValue;

/// 文字列の見た目の長さ
pub fn visual_len(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

/// 列内の最大長から列幅を決める: max(maxlen + 2, 10)
pub fn fit_column_width<'a, I>(cells: I) -> usize
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let max_len = cells
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(|c| visual_len(&c.to_string()))
        .max()
        .unwrap_or(0);

    (max_len + COLUMN_PADDING).max(MIN_COLUMN_WIDTH)
}
