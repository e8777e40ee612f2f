use std::fs;

use keysync_keybinds::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_backup_then_restore() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("keybindings.json");
    fs::write(&target, r#"[{"key":"a","command":"old"}]"#).unwrap();

    let manager = BackupManager::new(dir.path().join("backups"));
    let backup = manager.create_backup(&target).await.unwrap();

    fs::write(&target, r#"[{"key":"a","command":"new"}]"#).unwrap();

    let name = backup.file_name().unwrap().to_str().unwrap().to_string();
    manager.restore(&name, &target).await.unwrap();
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        r#"[{"key":"a","command":"old"}]"#
    );
}

#[tokio::test]
async fn test_backup_of_missing_target_is_empty_list() {
    let dir = TempDir::new().unwrap();
    let manager = BackupManager::new(dir.path().join("backups"));
    let backup = manager
        .create_backup(&dir.path().join("missing.json"))
        .await
        .unwrap();
    assert_eq!(fs::read_to_string(backup).unwrap(), "[]\n");
}

#[tokio::test]
async fn test_backups_in_same_second_get_distinct_names() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("keybindings.json");
    fs::write(&target, "[]").unwrap();

    let manager = BackupManager::new(dir.path().join("backups"));
    let first = manager.create_backup(&target).await.unwrap();
    let second = manager.create_backup(&target).await.unwrap();
    let third = manager.create_backup(&target).await.unwrap();

    assert_ne!(first, second);
    assert_ne!(second, third);
    assert_eq!(manager.list_backups().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_retention_keeps_newest_and_original() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("keybindings.json");
    fs::write(&target, "[]").unwrap();

    let manager = BackupManager::new(dir.path().join("backups")).with_retention(Some(2));
    manager.save_original(&target).await.unwrap();
    for _ in 0..4 {
        manager.create_backup(&target).await.unwrap();
    }

    let backups = manager.list_backups().await.unwrap();
    assert_eq!(backups.len(), 3);
    assert!(backups[0].original);
    assert!(backups[1..].iter().all(|b| !b.original));
}

#[tokio::test]
async fn test_original_is_never_overwritten() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    fs::write(&first, "[1]").unwrap();
    fs::write(&second, "[2]").unwrap();

    let manager = BackupManager::new(dir.path().join("backups"));
    let (path, written) = manager.save_original(&first).await.unwrap();
    assert!(written);
    let (_, written) = manager.save_original(&second).await.unwrap();
    assert!(!written);
    assert_eq!(fs::read_to_string(path).unwrap(), "[1]");

    let target = dir.path().join("keybindings.json");
    manager.restore_original(&target).await.unwrap();
    assert_eq!(fs::read_to_string(target).unwrap(), "[1]");
}

#[tokio::test]
async fn test_restore_rejects_bad_names() {
    let dir = TempDir::new().unwrap();
    let manager = BackupManager::new(dir.path().join("backups"));
    let target = dir.path().join("keybindings.json");

    assert!(matches!(
        manager.restore("../secret.json", &target).await,
        Err(BackupError::InvalidName(_))
    ));
    assert!(matches!(
        manager.restore("random.json", &target).await,
        Err(BackupError::InvalidName(_))
    ));
    assert!(matches!(
        manager
            .restore("keybindings-backup-2020-01-01_00-00-00.json", &target)
            .await,
        Err(BackupError::NotFound(_))
    ));
    assert!(matches!(
        manager.restore_original(&target).await,
        Err(BackupError::OriginalNotFound(_))
    ));
}

#[tokio::test]
async fn test_list_ignores_unrelated_files() {
    let dir = TempDir::new().unwrap();
    let backups = dir.path().join("backups");
    fs::create_dir_all(&backups).unwrap();
    fs::write(backups.join("notes.txt"), "x").unwrap();

    let manager = BackupManager::new(&backups);
    assert!(manager.list_backups().await.unwrap().is_empty());
}
