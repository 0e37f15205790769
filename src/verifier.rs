//! 購読確認の実装
//!
//! 実サービス連携はまだないため、固定時間待って成功を返す擬似実装のみ。

use async_trait::async_trait;
use results_lookup_common::{VerificationError, Verifier, VERIFY_DELAY};
use std::time::Duration;
use tracing::debug;

/// 一定時間待ってから常に購読済みと判定する
#[derive(Debug, Clone)]
pub struct DelayVerifier {
    delay: Duration,
}

impl DelayVerifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for DelayVerifier {
    fn default() -> Self {
        Self::new(VERIFY_DELAY)
    }
}

#[async_trait(?Send)]
impl Verifier for DelayVerifier {
    fn name(&self) -> &str {
        "delay"
    }

    async fn verify(&self, identifier: &str) -> Result<bool, VerificationError> {
        debug!(identifier, delay_ms = self.delay.as_millis() as u64, "simulating subscription check");
        tokio::time::sleep(self.delay).await;
        Ok(true)
    }
}
