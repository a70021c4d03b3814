//! coupon-sheet
//!
//! クーポンカタログJSONから書式付きExcelを生成し、
//! 生成済みファイルを日付別フォルダへバックアップする。

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod folder;
pub mod menu;

pub use archive::{ArchiveReport, CreateOutcome, FileManager};
pub use config::Config;
pub use error::{CouponSheetError, Result};
