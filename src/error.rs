use thiserror::Error;

#[derive(Error, Debug)]
pub enum CouponSheetError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("フォルダではありません: {0}")]
    NotADirectory(String),

    #[error("テンプレートファイルが見つかりません: {0}")]
    TemplateNotFound(String),

    #[error("テンプレートの形式が不正: {0}")]
    InvalidTemplate(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("Excel読み込みエラー: {0}")]
    ExcelRead(String),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

/// 共通ライブラリのエラーは対応するバリアントに展開する
impl From<coupon_sheet_common::Error> for CouponSheetError {
    fn from(err: coupon_sheet_common::Error) -> Self {
        match err {
            coupon_sheet_common::Error::Json(e) => CouponSheetError::JsonParse(e),
            coupon_sheet_common::Error::Template(msg) => CouponSheetError::InvalidTemplate(msg),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for CouponSheetError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        CouponSheetError::ExcelGeneration(err.to_string())
    }
}

impl From<calamine::XlsxError> for CouponSheetError {
    fn from(err: calamine::XlsxError) -> Self {
        CouponSheetError::ExcelRead(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CouponSheetError>;
