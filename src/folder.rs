//! フォルダ容量計算

use crate::config::Config;
use crate::error::{CouponSheetError, Result};
use std::path::Path;
use walkdir::WalkDir;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// フォルダ以下の通常ファイルの合計サイズ（バイト）
///
/// シンボリックリンクは辿らない。権限エラーや走査中に消えたエントリは読み飛ばす。
pub fn folder_size(path: &Path) -> Result<u64> {
    if !path.exists() {
        return Err(CouponSheetError::FolderNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(CouponSheetError::NotADirectory(path.display().to_string()));
    }

    let mut total = 0;

    for entry in WalkDir::new(path).follow_links(false).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::debug!("スキップ: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(meta) => total += meta.len(),
            Err(e) => log::debug!("スキップ: {}: {}", entry.path().display(), e),
        }
    }

    Ok(total)
}

/// バイト → MB（小数2桁で丸め）
pub fn bytes_to_megabytes(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
}

/// バックアップフォルダの容量（MB）
pub fn backup_size_mb(config: &Config) -> Result<f64> {
    folder_size(&config.backup_dir).map(bytes_to_megabytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_folder_size_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        assert_eq!(folder_size(dir.path()).unwrap(), 0);
    }

    #[test]
    fn test_folder_size_nested() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("a.txt"), vec![0u8; 100]).unwrap();
        fs::create_dir_all(dir.path().join("sub").join("deep")).unwrap();
        fs::write(dir.path().join("sub").join("b.bin"), vec![0u8; 2048]).unwrap();
        fs::write(dir.path().join("sub").join("deep").join("c.xlsx"), vec![0u8; 7]).unwrap();

        assert_eq!(folder_size(dir.path()).unwrap(), 100 + 2048 + 7);
    }

    #[cfg(unix)]
    #[test]
    fn test_folder_size_ignores_symlinks() {
        let dir = tempdir().expect("Failed to create temp dir");
        let outside = tempdir().expect("Failed to create temp dir");
        fs::write(outside.path().join("big.bin"), vec![0u8; 4096]).unwrap();
        fs::write(dir.path().join("small.txt"), vec![0u8; 10]).unwrap();

        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked_dir")).unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("big.bin"),
            dir.path().join("linked_file"),
        )
        .unwrap();

        assert_eq!(folder_size(dir.path()).unwrap(), 10);
    }

    #[cfg(unix)]
    #[test]
    fn test_folder_size_skips_unreadable_dir() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("a.txt"), vec![0u8; 30]).unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.bin"), vec![0u8; 500]).unwrap();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // root は権限を無視して読めるので確認できない
        let privileged = fs::read_dir(&locked).is_ok();
        let result = if privileged { None } else { Some(folder_size(dir.path())) };
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if let Some(result) = result {
            assert_eq!(result.unwrap(), 30);
        }
    }

    #[test]
    fn test_folder_size_not_found() {
        let result = folder_size(Path::new("/nonexistent/folder/12345"));
        assert!(matches!(result, Err(CouponSheetError::FolderNotFound(_))));
    }

    #[test]
    fn test_folder_size_not_a_directory() {
        let dir = tempdir().expect("Failed to create temp dir");
        let file = dir.path().join("file.txt");
        fs::write(&file, "hello").unwrap();

        let result = folder_size(&file);
        assert!(matches!(result, Err(CouponSheetError::NotADirectory(_))));
    }

    #[test]
    fn test_bytes_to_megabytes() {
        assert_eq!(bytes_to_megabytes(1_048_576), 1.0);
        assert_eq!(bytes_to_megabytes(0), 0.0);
        assert_eq!(bytes_to_megabytes(1_572_864), 1.5);
        // 1234567 / 1048576 = 1.1773...
        assert_eq!(bytes_to_megabytes(1_234_567), 1.18);
    }

    #[test]
    fn test_backup_size_mb() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::development(dir.path());
        fs::create_dir_all(config.backup_dir.join("07.15")).unwrap();
        fs::write(config.backup_dir.join("07.15").join("a.xlsx"), vec![0u8; 524_288]).unwrap();

        assert_eq!(backup_size_mb(&config).unwrap(), 0.5);
    }
}
