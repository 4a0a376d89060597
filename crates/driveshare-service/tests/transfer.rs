mod common;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use uuid::Uuid;

use common::{Harness, text_file};
use driveshare_core::config::{ShareConfig, StorageConfig};
use driveshare_core::error::ErrorKind;
use driveshare_service::{FileService, UploadFile};

#[tokio::test]
async fn upload_stores_object_then_row() {
    let h = Harness::new();
    let ctx = h.user("Ada", "Lovelace");
    let root = h.folders.create_root_folder(&ctx).await.unwrap();
    let docs = h.folders.create_subfolder(&ctx, root.id, "Docs").await.unwrap();

    let file = h
        .files
        .upload_file_to_folder(&ctx, docs.id, text_file("notes.txt", b"hello world"))
        .await
        .unwrap();

    assert_eq!(file.s3_key, "Ada_Lovelace/Docs/notes.txt");
    assert_eq!(file.size, 11);
    assert_eq!(file.file_type, "text/plain");
    assert_eq!(file.parent_folder_id, docs.id);
    assert_eq!(file.owner_id, ctx.user_id);
    assert!(!file.shared);

    let stored = h.storage.get("Ada_Lovelace/Docs/notes.txt").unwrap();
    assert_eq!(stored.data, Bytes::from_static(b"hello world"));
    assert_eq!(stored.content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn upload_without_type_defaults_to_octet_stream() {
    let h = Harness::new();
    let ctx = h.user("Ada", "Lovelace");
    let root = h.folders.create_root_folder(&ctx).await.unwrap();

    let file = h
        .files
        .upload_file_to_folder(
            &ctx,
            root.id,
            UploadFile {
                file_name: "blob".into(),
                file_type: None,
                data: Bytes::from_static(b"\x00\x01"),
            },
        )
        .await
        .unwrap();

    assert_eq!(file.file_type, "application/octet-stream");
}

#[tokio::test]
async fn duplicate_file_name_is_rejected() {
    let h = Harness::new();
    let ctx = h.user("Ada", "Lovelace");
    let root = h.folders.create_root_folder(&ctx).await.unwrap();
    h.upload(&ctx, root.id, "a.txt", b"first").await;

    let err = h
        .files
        .upload_file_to_folder(&ctx, root.id, text_file("a.txt", b"second"))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::DuplicateName));
    assert_eq!(
        h.storage.get("Ada_Lovelace/a.txt").unwrap().data,
        Bytes::from_static(b"first")
    );
}

#[tokio::test]
async fn upload_into_foreign_or_missing_folder_fails() {
    let h = Harness::new();
    let owner = h.user("Ada", "Lovelace");
    let intruder = h.user("Eve", "Mallory");
    let root = h.folders.create_root_folder(&owner).await.unwrap();

    let err = h
        .files
        .upload_file_to_folder(&intruder, root.id, text_file("x.txt", b"x"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Unauthorized));

    let err = h
        .files
        .upload_file_to_folder(&owner, Uuid::new_v4(), text_file("x.txt", b"x"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
    assert_eq!(h.storage.len(), 1);
}

#[tokio::test]
async fn oversized_upload_is_rejected_before_storage() {
    let h = Harness::new();
    let ctx = h.user("Ada", "Lovelace");
    let root = h.folders.create_root_folder(&ctx).await.unwrap();
    let limits = StorageConfig {
        max_upload_size_bytes: 4,
        ..StorageConfig::default()
    };
    let files = FileService::new(
        h.folders.clone(),
        Arc::new(h.index.clone()),
        Arc::new(h.storage.clone()),
        &limits,
        &ShareConfig::default(),
    );

    files
        .upload_file_to_folder(&ctx, root.id, text_file("small.bin", b"1234"))
        .await
        .unwrap();
    let err = files
        .upload_file_to_folder(&ctx, root.id, text_file("big.bin", b"12345"))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::Validation));
    assert!(!h.storage.contains("Ada_Lovelace/big.bin"));
}

#[tokio::test]
async fn failed_row_insert_leaves_the_object_behind() {
    let h = Harness::with_failing_file_inserts();
    let ctx = h.user("Ada", "Lovelace");
    let root = h.folders.create_root_folder(&ctx).await.unwrap();

    let err = h
        .files
        .upload_file_to_folder(&ctx, root.id, text_file("a.txt", b"a"))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::Upload));
    assert!(h.storage.contains("Ada_Lovelace/a.txt"));
    assert_eq!(h.index.file_count().await, 0);
}

#[tokio::test]
async fn storage_failure_fails_the_upload_without_a_row() {
    let h = Harness::new();
    let ctx = h.user("Ada", "Lovelace");
    let root = h.folders.create_root_folder(&ctx).await.unwrap();
    h.flaky.fail_puts(true);

    let err = h
        .files
        .upload_file_to_folder(&ctx, root.id, text_file("a.txt", b"a"))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::StorageUnavailable));
    assert_eq!(h.index.file_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn stalled_upload_times_out() {
    let h = Harness::with_storage_timeout(Duration::from_secs(5));
    let ctx = h.user("Ada", "Lovelace");
    let root = h.folders.create_root_folder(&ctx).await.unwrap();
    h.flaky.stall_puts(true);

    let err = h
        .files
        .upload_file_to_folder(&ctx, root.id, text_file("a.txt", b"a"))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::StorageUnavailable));
    assert_eq!(h.index.file_count().await, 0);
}

#[tokio::test]
async fn file_url_is_presigned_for_the_owner_only() {
    let h = Harness::new();
    let owner = h.user("Ada", "Lovelace");
    let intruder = h.user("Eve", "Mallory");
    let root = h.folders.create_root_folder(&owner).await.unwrap();
    let file = h.upload(&owner, root.id, "a.txt", b"a").await;

    let url = h.files.get_file_url(&owner, file.id).await.unwrap();
    assert!(url.url.starts_with("memory://test-bucket/Ada_Lovelace/a.txt?expires="));

    let err = h.files.get_file_url(&intruder, file.id).await.unwrap_err();
    assert!(err.is(ErrorKind::Unauthorized));

    let err = h.files.get_file_url(&owner, Uuid::new_v4()).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn delete_removes_object_and_row() {
    let h = Harness::new();
    let ctx = h.user("Ada", "Lovelace");
    let root = h.folders.create_root_folder(&ctx).await.unwrap();
    let file = h.upload(&ctx, root.id, "a.txt", b"a").await;

    h.files.delete_file(&ctx, file.id).await.unwrap();

    assert!(!h.storage.contains("Ada_Lovelace/a.txt"));
    assert_eq!(h.index.file_count().await, 0);

    let err = h.files.delete_file(&ctx, file.id).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn delete_tolerates_an_already_missing_object() {
    let h = Harness::new();
    let ctx = h.user("Ada", "Lovelace");
    let root = h.folders.create_root_folder(&ctx).await.unwrap();
    let file = h.upload(&ctx, root.id, "a.txt", b"a").await;
    h.flaky.report_missing_on_delete(true);

    h.files.delete_file(&ctx, file.id).await.unwrap();

    assert_eq!(h.index.file_count().await, 0);
}

#[tokio::test]
async fn delete_keeps_the_row_when_storage_fails() {
    let h = Harness::new();
    let ctx = h.user("Ada", "Lovelace");
    let root = h.folders.create_root_folder(&ctx).await.unwrap();
    let file = h.upload(&ctx, root.id, "a.txt", b"a").await;
    h.flaky.fail_deletes(true);

    let err = h.files.delete_file(&ctx, file.id).await.unwrap_err();

    assert!(err.is(ErrorKind::StorageUnavailable));
    assert_eq!(h.index.file_count().await, 1);
    assert!(h.storage.contains("Ada_Lovelace/a.txt"));
}

#[tokio::test]
async fn only_the_owner_can_delete() {
    let h = Harness::new();
    let owner = h.user("Ada", "Lovelace");
    let intruder = h.user("Eve", "Mallory");
    let root = h.folders.create_root_folder(&owner).await.unwrap();
    let file = h.upload(&owner, root.id, "a.txt", b"a").await;

    let err = h.files.delete_file(&intruder, file.id).await.unwrap_err();

    assert!(err.is(ErrorKind::Unauthorized));
    assert!(h.storage.contains("Ada_Lovelace/a.txt"));
}
