//! データセット読み込み
//!
//! パス指定がなければ同梱のサンプルデータを使う。

use crate::error::{LookupError, Result};
use results_lookup_common::Dataset;
use std::path::Path;
use tracing::{info, warn};

const BUNDLED_DATASET: &str = include_str!("../data/students.json");

pub fn load_dataset(path: Option<&Path>) -> Result<Dataset> {
    let (dataset, source) = match path {
        Some(path) => {
            if !path.exists() {
                return Err(LookupError::DatasetNotFound(path.display().to_string()));
            }
            (Dataset::from_json_file(path)?, path.display().to_string())
        }
        None => (Dataset::from_json_str(BUNDLED_DATASET)?, "bundled".to_string()),
    };

    if dataset.is_empty() {
        return Err(LookupError::EmptyDataset(source));
    }

    for exam_number in dataset.duplicate_exam_numbers() {
        warn!(exam_number, "duplicate exam number, the first record wins");
    }
    info!(records = dataset.len(), source = %source, "dataset loaded");

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset() {
        let dataset = load_dataset(None).expect("同梱データの読み込み失敗");
        assert!(!dataset.is_empty());
        assert!(dataset.duplicate_exam_numbers().is_empty());
        assert_eq!(dataset.find("12345").map(|r| r.rank), Some(3));
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset(Some(Path::new("/nonexistent/students.json"))).unwrap_err();
        assert!(matches!(err, LookupError::DatasetNotFound(_)));
    }
}
