//! シートデータの型定義
//!
//! - CellValue: セル1つ分の値
//! - SheetData: シート名 + 2次元グリッド（0行目がヘッダー）
//! - parse_catalog: クーポンカタログJSON → SheetDataの列

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::fmt;

/// セル値
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    String(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// ヘッダー照合用（文字列セルのみ）
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// JSONのスカラー値から変換
    ///
    /// 入れ子の配列・オブジェクトはJSON文字列として保持する
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map(CellValue::Number)
                .unwrap_or_else(|| CellValue::String(n.to_string())),
            Value::String(s) => CellValue::String(s.clone()),
            other => CellValue::String(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(s) => write!(f, "{}", s),
            // 整数値は小数点なしで表示（Excel上の見た目に合わせる）
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(true) => write!(f, "TRUE"),
            CellValue::Bool(false) => write!(f, "FALSE"),
        }
    }
}

/// 1シート分のデータ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    pub name: String,
    /// rows[0] がヘッダー行
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// 行数（max_row相当）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数（max_column相当）
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }

    pub fn header(&self) -> &[CellValue] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// 範囲外は空セル扱い
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }

    /// レコード配列からシートを構築
    ///
    /// 列はキーの出現順の和集合。欠けているキーは空セルになる。
    pub fn from_records(name: &str, records: &[Value]) -> Result<Self> {
        let mut columns: Vec<&str> = Vec::new();
        let mut objects: Vec<&Map<String, Value>> = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or_else(|| {
                Error::Template(format!(
                    "シート「{}」の{}件目がオブジェクトではありません",
                    name,
                    index + 1
                ))
            })?;
            for key in object.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
            objects.push(object);
        }

        let mut sheet = SheetData::new(name);
        if columns.is_empty() {
            return Ok(sheet);
        }

        sheet.rows.push(
            columns
                .iter()
                .map(|c| CellValue::String(c.to_string()))
                .collect(),
        );
        for object in objects {
            sheet.rows.push(
                columns
                    .iter()
                    .map(|c| object.get(*c).map(CellValue::from_json).unwrap_or_default())
                    .collect(),
            );
        }

        Ok(sheet)
    }
}

/// カタログJSON（シート名 → レコード配列）を解析
///
/// シート順・行順はドキュメント順を維持する
pub fn parse_catalog(value: &Value) -> Result<Vec<SheetData>> {
    let catalog = value
        .as_object()
        .ok_or_else(|| Error::Template("トップレベルがオブジェクトではありません".into()))?;

    if catalog.is_empty() {
        return Err(Error::Template("シートがありません".into()));
    }

    catalog
        .iter()
        .map(|(name, records)| {
            let records = records.as_array().ok_or_else(|| {
                Error::Template(format!("シート「{}」の値が配列ではありません", name))
            })?;
            SheetData::from_records(name, records)
        })
        .collect()
}
