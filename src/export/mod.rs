pub mod convert;
pub mod format;
pub mod workbook;

pub use convert::convert;
pub use format::{apply_formatting, FormatReport, FormatStep, StepFailure};

use crate::error::Result;
use std::path::Path;

/// 変換 → 書式設定
pub fn generate_workbook(json_path: &Path, output_path: &Path) -> Result<FormatReport> {
    convert(json_path, output_path)?;
    apply_formatting(output_path)
}
