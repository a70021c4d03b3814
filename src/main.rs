use anyhow::{bail, Context};
use clap::Parser;
use coupon_sheet::{archive, cli, config, error, export, folder, menu};
use archive::FileManager;
use cli::{Cli, Commands};
use config::Config;
use error::CouponSheetError;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        None => {
            config.ensure_dirs().context("フォルダの初期化に失敗しました")?;
            let manager = FileManager::new(config);
            menu::run_interactive(&manager)?;
        }

        Some(Commands::Create { names, all, backup }) => {
            println!("📄 coupon-sheet - ファイル作成\n");
            config.ensure_dirs().context("フォルダの初期化に失敗しました")?;

            let names = if all { config.template_names.clone() } else { names };
            if names.is_empty() {
                bail!("作成するファイル名を指定するか --all を付けてください");
            }

            let manager = FileManager::new(config);
            if backup {
                match manager.archive_existing() {
                    Ok(report) => menu::print_archive_report(&report),
                    Err(e) => {
                        println!("⚠ バックアップ中にエラー: {}", e);
                        return Ok(());
                    }
                }
            }

            let results = manager.create_all(&names);
            let failed = menu::print_create_results(&results);
            if failed > 0 {
                println!("\n⚠ {}件の作成に失敗しました", failed);
            } else {
                println!("\n✅ 完了");
            }
        }

        Some(Commands::Backup) => {
            println!("📦 coupon-sheet - バックアップ\n");
            config.ensure_dirs().context("フォルダの初期化に失敗しました")?;
            let manager = FileManager::new(config);
            let report = manager.archive_existing()?;
            menu::print_archive_report(&report);
        }

        Some(Commands::Convert { input, output, no_format }) => {
            println!("- 変換中: {}", input.display());
            export::convert(&input, &output)?;
            if !no_format {
                let report = export::apply_formatting(&output)?;
                for failure in &report.failures {
                    println!("  ⚠ 書式設定 [{}] {}: {}", failure.sheet, failure.step, failure.message);
                }
            }
            println!("✔ Excel出力: {}", output.display());
        }

        Some(Commands::Format { file }) => {
            let report = export::apply_formatting(&file)?;
            for failure in &report.failures {
                println!("  ⚠ 書式設定 [{}] {}: {}", failure.sheet, failure.step, failure.message);
            }
            println!("✔ 書式設定: {} ({}シート)", file.display(), report.sheets.len());
        }

        Some(Commands::Size { path }) => {
            let (target, size) = match path {
                Some(path) => {
                    let size = folder::folder_size(&path).map(folder::bytes_to_megabytes);
                    (path, size)
                }
                None => (config.backup_dir.clone(), folder::backup_size_mb(&config)),
            };
            match size {
                Ok(mb) => println!("{}: {} MB", target.display(), mb),
                Err(e @ (CouponSheetError::FolderNotFound(_) | CouponSheetError::NotADirectory(_))) => {
                    eprintln!("エラー: {}", e);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Some(Commands::Config) => {
            println!("設定:");
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
