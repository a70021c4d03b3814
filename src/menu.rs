//! 対話式メニュー
//!
//! 1. 操作選択: バックアップして作成 / 作成のみ
//! 2. ファイル選択: すべて / テンプレート名のいずれか

use crate::archive::{ArchiveReport, CreateOutcome, FileManager};
use crate::error::{CouponSheetError, Result};
use dialoguer::{theme::ColorfulTheme, Select};

/// 操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    BackupAndCreate,
    CreateOnly,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::BackupAndCreate, Action::CreateOnly];

    pub fn label(&self) -> &'static str {
        match self {
            Action::BackupAndCreate => "バックアップして作成",
            Action::CreateOnly => "作成のみ",
        }
    }
}

/// ファイル選択
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChoice {
    All,
    One(String),
}

const ALL_LABEL: &str = "すべて";

impl FileChoice {
    /// メニュー項目: 先頭が「すべて」、以降テンプレート名
    pub fn menu_items(names: &[String]) -> Vec<String> {
        std::iter::once(ALL_LABEL.to_string())
            .chain(names.iter().cloned())
            .collect()
    }

    pub fn from_index(index: usize, names: &[String]) -> Option<Self> {
        match index {
            0 => Some(FileChoice::All),
            n => names.get(n - 1).cloned().map(FileChoice::One),
        }
    }

    /// 作成対象の名前一覧
    pub fn names(&self, catalog: &[String]) -> Vec<String> {
        match self {
            FileChoice::All => catalog.to_vec(),
            FileChoice::One(name) => vec![name.clone()],
        }
    }
}

pub fn select_action() -> Result<Action> {
    let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("操作を選択してください")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| CouponSheetError::Prompt(e.to_string()))?;
    Ok(Action::ALL[index])
}

pub fn select_files(names: &[String]) -> Result<FileChoice> {
    let items = FileChoice::menu_items(names);
    // デフォルトは最初のテンプレート名
    let default = if names.is_empty() { 0 } else { 1 };
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("ファイルを選択してください")
        .items(&items)
        .default(default)
        .interact()
        .map_err(|e| CouponSheetError::Prompt(e.to_string()))?;

    FileChoice::from_index(index, names)
        .ok_or_else(|| CouponSheetError::Prompt(format!("無効な選択: {}", index)))
}

/// 対話式で実行
pub fn run_interactive(manager: &FileManager) -> Result<()> {
    let action = select_action()?;

    if action == Action::BackupAndCreate {
        match manager.archive_existing() {
            Ok(report) => print_archive_report(&report),
            Err(e) => {
                // バックアップに失敗したら作成には進まない
                println!("⚠ バックアップ中にエラー: {}", e);
                return Ok(());
            }
        }
    }

    let names = &manager.config().template_names;
    let choice = select_files(names)?;
    let results = manager.create_all(&choice.names(names));
    print_create_results(&results);

    Ok(())
}

pub fn print_archive_report(report: &ArchiveReport) {
    for (from, to) in &report.moved {
        println!("✔ バックアップ: {} → {}", from.display(), to.display());
    }
    if report.moved.is_empty() {
        println!("- バックアップ対象のファイルはありません");
    }
}

/// 作成結果を表示し、失敗件数を返す
pub fn print_create_results(results: &[(String, Result<CreateOutcome>)]) -> usize {
    let mut failed = 0;
    for (name, result) in results {
        match result {
            Ok(CreateOutcome::Created { path, report }) => {
                println!("✔ ファイル作成: {} ({})", name, path.display());
                for failure in &report.failures {
                    println!("  ⚠ 書式設定 [{}] {}: {}", failure.sheet, failure.step, failure.message);
                }
            }
            Ok(CreateOutcome::NoTemplate) => {
                println!("⚠ テンプレートファイルがありません: {}", name);
            }
            Err(e) => {
                println!("⚠ ファイル作成失敗 {}: {}", name, e);
                failed += 1;
            }
        }
    }
    failed
}
