//! ブラウザタイマーによる擬似購読確認

use async_trait::async_trait;
use gloo::timers::future::TimeoutFuture;
use results_lookup_common::{VerificationError, Verifier, VERIFY_DELAY};

/// 一定時間待ってから常に購読済みと判定する
#[derive(Debug, Clone, Copy)]
pub struct TimerVerifier {
    delay_ms: u32,
}

impl Default for TimerVerifier {
    fn default() -> Self {
        Self {
            delay_ms: VERIFY_DELAY.as_millis() as u32,
        }
    }
}

#[async_trait(?Send)]
impl Verifier for TimerVerifier {
    fn name(&self) -> &str {
        "browser-timer"
    }

    async fn verify(&self, _identifier: &str) -> Result<bool, VerificationError> {
        TimeoutFuture::new(self.delay_ms).await;
        Ok(true)
    }
}
