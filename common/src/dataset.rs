//! 成績データセット
//!
//! 起動時に一度だけ読み込み、以後は読み取り専用で共有する。

use crate::error::{Error, Result};
use crate::matcher;
use crate::types::StudentRecord;
use std::collections::HashSet;
use std::path::Path;

/// 読み込み済みの成績レコード一覧
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<StudentRecord>,
}

impl Dataset {
    /// レコード一覧から作成（受験番号が空のレコードはエラー）
    pub fn new(records: Vec<StudentRecord>) -> Result<Self> {
        if let Some(index) = records.iter().position(|r| r.exam_number.trim().is_empty()) {
            return Err(Error::Dataset(format!("record {}: examNumber is empty", index + 1)));
        }
        Ok(Self { records })
    }

    /// JSON文字列から読み込み
    pub fn from_json_str(content: &str) -> Result<Self> {
        let records: Vec<StudentRecord> = serde_json::from_str(content)?;
        Self::new(records)
    }

    /// JSONファイルから読み込み
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 受験番号で検索
    pub fn find(&self, identifier: &str) -> Option<&StudentRecord> {
        matcher::find(identifier, &self.records)
    }

    /// 重複している受験番号（出現順、重複なし）
    pub fn duplicate_exam_numbers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.records
            .iter()
            .map(|r| r.exam_number.as_str())
            .filter(|n| !seen.insert(*n) && reported.insert(*n))
            .collect()
    }
}
