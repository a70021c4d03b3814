//! Coupon Sheet Common Library
//!
//! CLIとテストで共有される型とユーティリティ（I/Oなし）

pub mod types;
pub mod layout;
pub mod width;
pub mod token;
pub mod error;

pub use types::{CellValue, SheetData, parse_catalog};
pub use layout::{SheetLayout, SpecialColumns, CellStyle};
pub use width::{visual_len, fit_column_width};
pub use token::{extract_token, output_file_name, tomorrow};
pub use error::{Error, Result};
