//! 生成・バックアップ処理
//!
//! - 作成: テンプレートJSON → `<名前><MM.DD>.xlsx`（明日の日付）
//! - バックアップ: 出力先の `*.xlsx` をファイル名の日付トークン別フォルダへ移動

use crate::config::Config;
use crate::error::Result;
use crate::export::{self, FormatReport};
use chrono::NaiveDate;
use coupon_sheet_common::{extract_token, output_file_name, tomorrow};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 作成結果
#[derive(Debug)]
pub enum CreateOutcome {
    Created { path: PathBuf, report: FormatReport },
    /// テンプレートJSONが1つもない（何も書き込まない）
    NoTemplate,
}

/// バックアップ結果
#[derive(Debug, Default)]
pub struct ArchiveReport {
    /// (移動元, 移動先)
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// 一覧取得後に消えていたファイル
    pub skipped: Vec<PathBuf>,
}

pub struct FileManager {
    config: Config,
}

impl FileManager {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// テンプレートフォルダ内の最初のJSON（ファイル名順）
    pub fn find_template(&self) -> Option<PathBuf> {
        list_files(&self.config.template_dir, "json").into_iter().next()
    }

    /// 明日の日付でファイルを作成
    pub fn create_output(&self, name: &str) -> Result<CreateOutcome> {
        self.create_output_on(name, tomorrow())
    }

    pub fn create_output_on(&self, name: &str, date: NaiveDate) -> Result<CreateOutcome> {
        let Some(template) = self.find_template() else {
            log::warn!(
                "テンプレートファイルがありません: {}",
                self.config.template_dir.display()
            );
            return Ok(CreateOutcome::NoTemplate);
        };

        let path = self.config.home_dir.join(output_file_name(name, date));
        log::info!("{} → {}", template.display(), path.display());

        let report = export::generate_workbook(&template, &path)?;
        Ok(CreateOutcome::Created { path, report })
    }

    /// 複数ファイルを作成（失敗しても残りは続行）
    pub fn create_all(&self, names: &[String]) -> Vec<(String, Result<CreateOutcome>)> {
        names
            .iter()
            .map(|name| (name.clone(), self.create_output(name)))
            .collect()
    }

    /// 出力先直下の `*.xlsx`（ファイル名順）
    pub fn list_workbooks(&self) -> Vec<PathBuf> {
        list_files(&self.config.home_dir, "xlsx")
    }

    /// 既存ファイルを日付トークン別フォルダへ移動
    pub fn archive_existing(&self) -> Result<ArchiveReport> {
        let files = self.list_workbooks();
        self.archive_files(&files)
    }

    pub fn archive_files(&self, files: &[PathBuf]) -> Result<ArchiveReport> {
        let mut report = ArchiveReport::default();

        for path in files {
            // 一覧取得後に外部で削除された場合はスキップ
            if !path.exists() {
                log::debug!("ファイルが見つからないためスキップ: {}", path.display());
                report.skipped.push(path.clone());
                continue;
            }

            let Some(file_name) = path.file_name() else {
                continue;
            };
            let token = extract_token(&file_name.to_string_lossy());
            if token.is_empty() {
                log::debug!("日付トークンなし: {}", path.display());
            }

            let target_dir = self.config.backup_dir.join(&token);
            std::fs::create_dir_all(&target_dir)?;

            let target = target_dir.join(file_name);
            move_file(path, &target)?;
            log::debug!("移動: {} → {}", path.display(), target.display());
            report.moved.push((path.clone(), target));
        }

        Ok(report)
    }
}

/// フォルダ直下の指定拡張子のファイル（再帰しない）
fn list_files(folder: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().map(|ext| ext == extension).unwrap_or(false))
        .collect();

    files.sort();
    files
}

/// rename できない場合（別ファイルシステム）はコピーして削除
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if !from.exists() {
                return Err(rename_err);
            }
            std::fs::copy(from, to).map_err(|_| rename_err)?;
            std::fs::remove_file(from)
        }
    }
}
