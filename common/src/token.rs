//! ファイル名の日付トークン
//!
//! 生成ファイル名は `<ベース名><MM>.<DD>.xlsx`。バックアップ時はファイル名から
//! `数字.数字` を取り出して振り分け先フォルダ名にする。

use chrono::{Duration, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"\d+\.\d+").unwrap();
}

/// ファイル名から最初の `数字.数字` を抽出（なければ空文字）
pub fn extract_token(file_name: &str) -> String {
    TOKEN_RE
        .find(file_name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// 出力ファイル名: ベース名 + MM.DD + ".xlsx"
pub fn output_file_name(base: &str, date: NaiveDate) -> String {
    format!("{}{}.xlsx", base, date.format("%m.%d"))
}

/// 明日の日付（ローカル時刻）
pub fn tomorrow() -> NaiveDate {
    Local::now().date_naive() + Duration::days(1)
}
