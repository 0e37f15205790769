//! 検索フローの状態機械（CLI/WASM共通）
//!
//! 入力 → 検証 → 購読確認 → 照合 → 結果 の遷移を管理する。
//! 非同期処理やタイマーは持たず、フロントエンドが以下を呼び出す:
//!
//! 1. `submit` で試行を開始（入力が空ならその場で InputError）
//! 2. 返された `Attempt` について購読確認を実行し `resolve` を呼ぶ
//! 3. Found の場合は返された `CelebrationToken` で演出タイマーを予約し、
//!    満了時に `end_celebration` を呼ぶ
//!
//! 古い試行・古いタイマーからの呼び出しは世代番号で判定して無視する。

use crate::matcher;
use crate::types::StudentRecord;
use crate::verifier::VerificationError;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// お祝い演出の表示時間
pub const CELEBRATION_WINDOW: Duration = Duration::from_secs(5);

/// 検索フローのフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Verifying,
    Matching,
    Found,
    NotFound,
    InputError,
    VerificationFailed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Verifying => "verifying",
            Phase::Matching => "matching",
            Phase::Found => "found",
            Phase::NotFound => "not-found",
            Phase::InputError => "input-error",
            Phase::VerificationFailed => "verification-failed",
        }
    }

    /// 1回の試行の終端フェーズか
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Phase::Found | Phase::NotFound | Phase::InputError | Phase::VerificationFailed
        )
    }

    /// 試行の途中（送信不可）か
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Validating | Phase::Verifying | Phase::Matching)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 試行の失敗種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// 入力が空
    EmptyInput,
    /// 該当レコードなし
    NotFound,
    /// 未購読
    NotSubscribed,
    /// 購読確認自体に失敗（タイムアウト、サービス障害）
    VerificationFailed,
}

impl Failure {
    /// ユーザー向けメッセージ
    pub fn message(&self) -> &'static str {
        match self {
            Failure::EmptyInput => "please enter the exam identifier",
            Failure::NotFound => "exam identifier not found",
            Failure::NotSubscribed => "subscribe to the channel to see your result",
            Failure::VerificationFailed => "could not verify the channel subscription",
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Failure::EmptyInput => Phase::InputError,
            Failure::NotFound => Phase::NotFound,
            Failure::NotSubscribed | Failure::VerificationFailed => Phase::VerificationFailed,
        }
    }
}

/// 描画層に公開する状態スナップショット
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub input_value: String,
    pub phase: Phase,
    /// Found の時のみ Some
    pub matched_record: Option<StudentRecord>,
    /// NotFound / InputError / VerificationFailed の時のみ Some
    pub error_message: Option<String>,
    pub celebration_active: bool,
}

impl SearchState {
    /// 送信ボタンを有効にできるか
    pub fn submit_enabled(&self) -> bool {
        !self.phase.is_busy()
    }
}

/// 購読確認待ちの試行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    id: u64,
    identifier: String,
}

impl Attempt {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// trim済みの受験番号
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// お祝い演出タイマーの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelebrationToken(u64);

/// `submit` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// 購読確認を実行して `resolve` を呼ぶこと
    Verify(Attempt),
    /// 入力エラーで終了（購読確認・照合は行わない）
    Invalid,
}

/// `resolve` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 演出タイマーを `CELEBRATION_WINDOW` 後に満了させること
    Found(CelebrationToken),
    NotFound,
    VerificationFailed,
    /// キャンセル済みなど、現在の試行ではない
    Stale,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("a search is already in progress")]
    Busy,
}

/// 1ユーザー分の検索セッション
#[derive(Debug, Default)]
pub struct SearchSession {
    state: SearchState,
    trace: Vec<Phase>,
    attempt_seq: u64,
    pending: Option<u64>,
    celebration_seq: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// 現在の試行で通過したフェーズ（`submit` ごとにリセット）
    pub fn trace(&self) -> &[Phase] {
        &self.trace
    }

    /// 入力欄の編集（フェーズは変えない）
    pub fn set_input(&mut self, input: &str) {
        self.state.input_value = input.to_string();
    }

    /// 検索を開始
    ///
    /// 前回の結果・エラー・演出はここで破棄される。
    pub fn submit(&mut self, input: &str) -> Result<Submission, SessionError> {
        if self.state.phase.is_busy() {
            return Err(SessionError::Busy);
        }

        self.trace.clear();
        self.state.input_value = input.to_string();
        self.state.matched_record = None;
        self.state.error_message = None;
        self.stop_celebration();
        self.enter(Phase::Validating);

        let Some(identifier) = matcher::normalize_identifier(input) else {
            self.fail(Failure::EmptyInput);
            return Ok(Submission::Invalid);
        };

        self.attempt_seq += 1;
        self.pending = Some(self.attempt_seq);
        let attempt = Attempt {
            id: self.attempt_seq,
            identifier: identifier.to_string(),
        };
        self.enter(Phase::Verifying);

        Ok(Submission::Verify(attempt))
    }

    /// 購読確認の結果を反映し、成功なら照合まで行う
    pub fn resolve(
        &mut self,
        attempt: &Attempt,
        verdict: Result<bool, VerificationError>,
        records: &[StudentRecord],
    ) -> Resolution {
        if self.pending != Some(attempt.id) {
            return Resolution::Stale;
        }
        self.pending = None;

        match verdict {
            Ok(true) => {}
            Ok(false) => {
                self.fail(Failure::NotSubscribed);
                return Resolution::VerificationFailed;
            }
            Err(_) => {
                self.fail(Failure::VerificationFailed);
                return Resolution::VerificationFailed;
            }
        }

        self.enter(Phase::Matching);
        match matcher::find(&attempt.identifier, records) {
            Some(record) => {
                self.state.matched_record = Some(record.clone());
                self.enter(Phase::Found);
                self.celebration_seq += 1;
                self.state.celebration_active = true;
                Resolution::Found(CelebrationToken(self.celebration_seq))
            }
            None => {
                self.fail(Failure::NotFound);
                Resolution::NotFound
            }
        }
    }

    /// 購読確認待ちを中断して Idle に戻す
    ///
    /// 待ちがなければ何もしない。
    pub fn cancel(&mut self) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.state.matched_record = None;
        self.state.error_message = None;
        self.enter(Phase::Idle);
        true
    }

    /// 演出タイマーの満了
    ///
    /// 現在の Found に対応するトークンの場合のみフラグを下ろす。
    pub fn end_celebration(&mut self, token: CelebrationToken) -> bool {
        if token.0 != self.celebration_seq || !self.state.celebration_active {
            return false;
        }
        self.state.celebration_active = false;
        true
    }

    fn stop_celebration(&mut self) {
        self.state.celebration_active = false;
        // 予約済みタイマーのトークンを無効化
        self.celebration_seq += 1;
    }

    fn fail(&mut self, failure: Failure) {
        self.state.matched_record = None;
        self.state.error_message = Some(failure.message().to_string());
        self.enter(failure.phase());
    }

    fn enter(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.trace.push(phase);
    }
}
