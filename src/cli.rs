use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coupon-sheet")]
#[command(about = "クーポンカタログJSON → Excel生成・日付別バックアップツール", long_about = None)]
pub struct Cli {
    /// 省略時は対話メニュー
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テンプレートから明日の日付のExcelを作成
    Create {
        /// 作成するファイル名（ベース名）
        names: Vec<String>,

        /// 設定済みのテンプレート名をすべて作成
        #[arg(short, long)]
        all: bool,

        /// 作成前に既存ファイルをバックアップ
        #[arg(short, long)]
        backup: bool,
    },

    /// 出力先のExcelを日付フォルダへバックアップ
    Backup,

    /// JSONをExcelに変換
    Convert {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力Excelファイル
        #[arg(required = true)]
        output: PathBuf,

        /// 書式設定をしない
        #[arg(long)]
        no_format: bool,
    },

    /// 既存のExcelに書式を設定
    Format {
        /// 対象Excelファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// フォルダ容量を表示（省略時はバックアップフォルダ）
    Size {
        path: Option<PathBuf>,
    },

    /// 設定を表示
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_subcommand() {
        let cli = Cli::try_parse_from(["coupon-sheet"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from(["coupon-sheet", "create", "京东优惠券", "--backup", "-v"]).unwrap();
        match cli.command {
            Some(Commands::Create { names, all, backup }) => {
                assert_eq!(names, vec!["京东优惠券"]);
                assert!(!all);
                assert!(backup);
            }
            _ => panic!("create として解析されていない"),
        }
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_convert_requires_paths() {
        assert!(Cli::try_parse_from(["coupon-sheet", "convert", "a.json"]).is_err());
        assert!(Cli::try_parse_from(["coupon-sheet", "convert", "a.json", "b.xlsx"]).is_ok());
    }
}
