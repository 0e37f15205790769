//! 購読確認（外部サービス）の抽象境界
//!
//! 検索フローはこのトレイトにのみ依存する。実装はフロントエンド側
//! （CLI: tokioタイマー、Web: ブラウザタイマー）で提供する。
//! ブラウザのFutureは `Send` ではないため、トレイトも `?Send` とする。

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 擬似確認の待ち時間
pub const VERIFY_DELAY: Duration = Duration::from_secs(2);

/// 購読確認の失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// 待ち時間の上限（`Debug` 表記で "10s" / "250ms"）
    #[error("verification timed out after {0:?}")]
    Timeout(Duration),

    #[error("verification service error: {0}")]
    Service(String),

    #[error("verification service unreachable: {0}")]
    Unreachable(String),
}

/// 購読確認
///
/// `Ok(true)` は購読済み、`Ok(false)` は未購読。
#[async_trait(?Send)]
pub trait Verifier {
    /// ログ表示用の名前
    fn name(&self) -> &str;

    async fn verify(&self, identifier: &str) -> Result<bool, VerificationError>;
}
