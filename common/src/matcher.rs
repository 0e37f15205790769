//! 受験番号によるレコード照合
//!
//! 入力は前後の空白を除去してから比較する。照合は完全一致のみで、
//! 重複がある場合はコレクション順で最初のレコードを返す。

use crate::types::StudentRecord;

/// 入力を正規化（trim）。空になる場合はNone
pub fn normalize_identifier(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// 受験番号に一致するレコードを検索
pub fn find<'a>(identifier: &str, records: &'a [StudentRecord]) -> Option<&'a StudentRecord> {
    let needle = normalize_identifier(identifier)?;
    records.iter().find(|r| r.exam_number == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(exam_number: &str, full_name: &str, rank: u32) -> StudentRecord {
        StudentRecord {
            exam_number: exam_number.to_string(),
            full_name: full_name.to_string(),
            average: 90.0,
            department: "Science".to_string(),
            rank,
        }
    }

    fn records() -> Vec<StudentRecord> {
        vec![
            record("12345", "Ali Hassan", 3),
            record("23456", "Sara Ahmed", 1),
            record("34567", "Omar Khalid", 2),
        ]
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("12345"), Some("12345"));
        assert_eq!(normalize_identifier("  12345\t"), Some("12345"));
        assert_eq!(normalize_identifier(""), None);
        assert_eq!(normalize_identifier(" \n "), None);
    }

    #[test]
    fn test_find_every_present_identifier() {
        let records = records();
        for r in &records {
            let found = find(&r.exam_number, &records).expect("レコードが見つからない");
            assert_eq!(found, r);
        }
    }

    #[test]
    fn test_find_trims_input() {
        let records = records();
        let found = find(" 12345 ", &records).expect("レコードが見つからない");
        assert_eq!(found.full_name, "Ali Hassan");
    }

    #[test]
    fn test_find_absent() {
        let records = records();
        assert!(find("99999", &records).is_none());
        // 部分一致はしない
        assert!(find("1234", &records).is_none());
        assert!(find("123456", &records).is_none());
    }

    #[test]
    fn test_find_empty_identifier() {
        let mut records = records();
        records.push(record("", "Blank", 9));
        assert!(find("", &records).is_none());
        assert!(find("   ", &records).is_none());
    }

    #[test]
    fn test_find_first_duplicate_wins() {
        let records = vec![
            record("11111", "First", 1),
            record("11111", "Second", 2),
        ];
        let found = find("11111", &records).expect("レコードが見つからない");
        assert_eq!(found.full_name, "First");
    }

    #[test]
    fn test_find_is_idempotent() {
        let records = records();
        assert_eq!(find("23456", &records), find("23456", &records));
        assert_eq!(find("00000", &records), find("00000", &records));
    }

    #[test]
    fn test_find_in_empty_collection() {
        assert!(find("12345", &[]).is_none());
    }
}
