//! 成績レコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - StudentRecord: データセットの1行（読み取り専用）

use serde::{Deserialize, Serialize};

/// 学生の成績レコード
///
/// データセット読み込み後は変更されない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// 受験番号（JSONでは数値の場合もあるが、常に文字列として保持）
    #[serde(alias = "الرقم الامتحاني", deserialize_with = "exam_number::deserialize")]
    pub exam_number: String,

    #[serde(alias = "اسم الطالب الرباعي")]
    pub full_name: String,

    /// 平均点
    #[serde(alias = "المعدل")]
    pub average: f64,

    #[serde(alias = "القسم")]
    pub department: String,

    /// 順位
    #[serde(alias = "التسلسل")]
    pub rank: u32,
}

impl StudentRecord {
    /// 平均点を小数点以下2桁で表示
    ///
    /// ちょうど中間の値は絶対値の大きい方に丸める（97.125 -> "97.13"）。
    pub fn average_display(&self) -> String {
        to_fixed_2(self.average)
    }

    pub fn rank_display(&self) -> String {
        self.rank.to_string()
    }

    /// 結果表示用の (ラベル, 値) 一覧
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.full_name.clone()),
            ("Exam number", self.exam_number.clone()),
            ("Average", self.average_display()),
            ("Department", self.department.clone()),
            ("Rank", self.rank_display()),
        ]
    }
}

/// 小数点以下2桁への丸め（中間値は0から遠い方へ）
///
/// `{:.2}` は厳密な中間値を偶数側に丸めるため、その場合だけ自前で丸める。
/// 2桁目で厳密な中間になる f64 は m/8（m は奇数）の形に限られる。
fn to_fixed_2(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 {
        let cents = (value.abs() * 100.0).ceil().copysign(value);
        return format!("{:.2}", cents / 100.0);
    }
    format!("{:.2}", value)
}

mod exam_number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(i64),
        Uint(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Int(n) => n.to_string(),
            Repr::Uint(n) => n.to_string(),
            Repr::Text(s) => s,
        })
    }
}
