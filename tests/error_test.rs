//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use results_lookup::dataset::load_dataset;
use results_lookup::error::LookupError;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないデータセット
#[test]
fn test_load_nonexistent_dataset() {
    let result = load_dataset(Some(Path::new("/nonexistent/path/students.json")));
    assert!(matches!(result, Err(LookupError::DatasetNotFound(_))));
}

/// 空のデータセットはエラー
#[test]
fn test_load_empty_dataset() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("students.json");
    std::fs::write(&path, "[]").unwrap();

    let result = load_dataset(Some(&path));
    assert!(matches!(result, Err(LookupError::EmptyDataset(_))));
}

/// 不正なJSON
#[test]
fn test_load_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("students.json");
    std::fs::write(&path, "{ invalid json }").unwrap();

    let err = load_dataset(Some(&path)).unwrap_err();
    assert!(matches!(
        err,
        LookupError::Common(results_lookup_common::Error::Json(_))
    ));
}

/// 受験番号が空のレコード
#[test]
fn test_load_blank_exam_number() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("students.json");
    std::fs::write(
        &path,
        r#"[{"examNumber": "", "fullName": "A", "average": 90, "department": "X", "rank": 1}]"#,
    )
    .unwrap();

    let err = load_dataset(Some(&path)).unwrap_err();
    assert!(matches!(
        err,
        LookupError::Common(results_lookup_common::Error::Dataset(_))
    ));
}

/// 元データ形式（アラビア語キー・数値の受験番号）のファイル
#[test]
fn test_load_arabic_key_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("students_data.json");
    std::fs::write(
        &path,
        r#"[{
            "الرقم الامتحاني": 12345,
            "اسم الطالب الرباعي": "Ali Hassan",
            "المعدل": 95.5,
            "القسم": "Science",
            "التسلسل": 3
        }]"#,
    )
    .unwrap();

    let dataset = load_dataset(Some(&path)).expect("読み込み失敗");
    assert_eq!(dataset.find("12345").map(|r| r.average_display()), Some("95.50".to_string()));
}

/// LookupErrorのDisplay実装確認（CLIの表示文言は英語で統一）
#[test]
fn test_error_display() {
    let cases = vec![
        (
            LookupError::Config("home directory not found".to_string()),
            "Config error: home directory not found",
        ),
        (
            LookupError::DatasetNotFound("students.json".to_string()),
            "Dataset not found: students.json",
        ),
        (
            LookupError::EmptyDataset("students.json".to_string()),
            "Dataset has no records: students.json",
        ),
        (
            LookupError::Prompt("interrupted".to_string()),
            "Prompt error: interrupted",
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(format!("{}", err), expected);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: LookupError = io_err.into();

    assert!(matches!(err, LookupError::Io(_)));
    assert_eq!(format!("{}", err), "IO error: file not found");
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: LookupError = json_err.into();

    assert!(matches!(err, LookupError::JsonParse(_)));
}

/// common::Errorは透過的に表示される
#[test]
fn test_common_error_transparent() {
    let common_err = results_lookup_common::Error::Dataset("record 1: examNumber is empty".to_string());
    let err: LookupError = common_err.into();

    assert!(matches!(err, LookupError::Common(_)));
    assert_eq!(format!("{}", err), "Dataset error: record 1: examNumber is empty");
}
