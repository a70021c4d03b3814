use crate::error::{CouponSheetError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 開発モード切り替えの環境変数
pub const DEV_MODE_VAR: &str = "DEV_MODE";

/// デフォルトのテンプレート名一覧
pub const DEFAULT_TEMPLATE_NAMES: &[&str] = &["京东优惠券", "淘宝优惠券", "活动班"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// プロジェクト直下の temp/ と data/json/ を使う
    Development,
    /// ~/Desktop 以下を使う
    Production,
}

impl Mode {
    /// `DEV_MODE=True` のときだけ開発モード
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("True") => Mode::Development,
            _ => Mode::Production,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub mode: Mode,
    /// 生成ファイルの出力先（バックアップの走査対象でもある）
    pub home_dir: PathBuf,
    /// バックアップ先ルート
    pub backup_dir: PathBuf,
    /// テンプレートJSONの置き場所
    pub template_dir: PathBuf,
    pub template_names: Vec<String>,
}

impl Config {
    /// .env を読み込み、環境変数からモードを決めて設定を構築
    pub fn load() -> Result<Self> {
        let env_path = Self::project_root().join(".env");
        if env_path.exists() {
            match dotenvy::from_path(&env_path) {
                Ok(()) => log::debug!(".env を読み込みました: {}", env_path.display()),
                Err(e) => log::warn!(".env の読み込みに失敗: {}", e),
            }
        }

        let mode = Mode::from_env_value(std::env::var(DEV_MODE_VAR).ok().as_deref());
        let config = match mode {
            Mode::Development => Self::development(&Self::project_root()),
            Mode::Production => {
                let home = dirs::home_dir()
                    .ok_or_else(|| CouponSheetError::Config("ホームディレクトリが見つかりません".into()))?;
                Self::production(&home)
            }
        };

        log::debug!("設定: {:?}", config);
        Ok(config)
    }

    pub fn development(project_root: &Path) -> Self {
        let temp = project_root.join("temp");
        Self {
            mode: Mode::Development,
            backup_dir: temp.join("backup"),
            home_dir: temp,
            template_dir: project_root.join("data").join("json"),
            template_names: default_template_names(),
        }
    }

    pub fn production(user_home: &Path) -> Self {
        let desktop = user_home.join("Desktop");
        Self {
            mode: Mode::Production,
            backup_dir: desktop.join("backup"),
            template_dir: desktop.join("json"),
            home_dir: desktop,
            template_names: default_template_names(),
        }
    }

    pub fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    /// 出力先・バックアップ先・テンプレート置き場を作成
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.home_dir, &self.backup_dir, &self.template_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
                log::info!("フォルダを作成しました: {}", dir.display());
            }
        }
        Ok(())
    }
}

fn default_template_names() -> Vec<String> {
    DEFAULT_TEMPLATE_NAMES.iter().map(|s| s.to_string()).collect()
}
