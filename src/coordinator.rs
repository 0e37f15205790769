//! 検索フローの非同期ドライバ
//!
//! `SearchSession`（状態機械）に購読確認・タイムアウト・キャンセル・
//! お祝い演出タイマーを接続する。状態の変化は `watch` チャネルで配信し、
//! 描画側はそれを購読するだけでよい。

use crate::config::Config;
use results_lookup_common::{
    CelebrationToken, Dataset, Resolution, SearchSession, SearchState, SessionError,
    Submission, VerificationError, Verifier, CELEBRATION_WINDOW,
};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// フローのタイミング設定
#[derive(Debug, Clone, Copy)]
pub struct FlowSettings {
    pub verify_timeout: Duration,
    pub celebration_window: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            verify_timeout: Duration::from_secs(10),
            celebration_window: CELEBRATION_WINDOW,
        }
    }
}

impl From<&Config> for FlowSettings {
    fn from(config: &Config) -> Self {
        Self {
            verify_timeout: config.verify_timeout(),
            celebration_window: config.celebration_window(),
        }
    }
}

/// 実行中の購読確認を中断するハンドル
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<Notify>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.notify_waiters();
    }
}

/// セッションと配信チャネル（演出タイマーとも共有）
struct Shared {
    session: Mutex<SearchSession>,
    state_tx: watch::Sender<SearchState>,
}

impl Shared {
    /// セッションを更新して最新状態を配信
    fn update<R>(&self, f: impl FnOnce(&mut SearchSession) -> R) -> R {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut session);
        self.state_tx.send_replace(session.state().clone());
        result
    }

    fn snapshot(&self) -> SearchState {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state()
            .clone()
    }

    fn trace(&self) -> String {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        session
            .trace()
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// 1セッション分の検索フロー
pub struct Coordinator<V> {
    verifier: V,
    dataset: Arc<Dataset>,
    settings: FlowSettings,
    shared: Arc<Shared>,
    cancel: Arc<Notify>,
    celebration: Option<JoinHandle<()>>,
}

impl<V: Verifier> Coordinator<V> {
    pub fn new(verifier: V, dataset: Arc<Dataset>, settings: FlowSettings) -> Self {
        let session = SearchSession::new();
        let (state_tx, _) = watch::channel(session.state().clone());
        Self {
            verifier,
            dataset,
            settings,
            shared: Arc::new(Shared {
                session: Mutex::new(session),
                state_tx,
            }),
            cancel: Arc::new(Notify::new()),
            celebration: None,
        }
    }

    /// 状態の変化を購読
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state_tx.subscribe()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancel))
    }

    pub fn state(&self) -> SearchState {
        self.shared.snapshot()
    }

    /// 1回分の検索を実行し、終了時の状態を返す
    ///
    /// `&mut self` のため同一セッションで同時に2つの試行は走らない。
    pub async fn submit(&mut self, input: &str) -> Result<SearchState, SessionError> {
        self.cancel_celebration();

        // Verifying を配信する前に待ち受けを登録しておく
        // （`notify_waiters` は未登録の待ち手には届かない）
        let cancel = Arc::clone(&self.cancel);
        let cancelled = cancel.notified();
        tokio::pin!(cancelled);
        cancelled.as_mut().enable();

        let attempt = match self.shared.update(|s| s.submit(input))? {
            Submission::Verify(attempt) => attempt,
            Submission::Invalid => {
                info!(trace = %self.shared.trace(), "empty exam identifier");
                return Ok(self.state());
            }
        };

        debug!(
            attempt = attempt.id(),
            identifier = attempt.identifier(),
            verifier = self.verifier.name(),
            "verifying subscription"
        );

        let limit = self.settings.verify_timeout;
        let verify = tokio::time::timeout(limit, self.verifier.verify(attempt.identifier()));

        let verdict = tokio::select! {
            result = verify => result.unwrap_or(Err(VerificationError::Timeout(limit))),
            _ = &mut cancelled => {
                self.shared.update(|s| s.cancel());
                info!(attempt = attempt.id(), "verification cancelled");
                return Ok(self.state());
            }
        };

        if let Err(err) = &verdict {
            warn!(attempt = attempt.id(), error = %err, "subscription verification failed");
        }

        let records = self.dataset.records();
        let resolution = self.shared.update(|s| s.resolve(&attempt, verdict, records));
        info!(
            attempt = attempt.id(),
            trace = %self.shared.trace(),
            "search finished"
        );

        if let Resolution::Found(token) = resolution {
            self.schedule_celebration_end(token);
        }

        Ok(self.state())
    }

    fn schedule_celebration_end(&mut self, token: CelebrationToken) {
        let shared = Arc::clone(&self.shared);
        let window = self.settings.celebration_window;
        debug!(window_secs = window.as_secs(), "celebration started");

        self.celebration = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if shared.update(|s| s.end_celebration(token)) {
                debug!("celebration window closed");
            }
        }));
    }

    fn cancel_celebration(&mut self) {
        if let Some(handle) = self.celebration.take() {
            if !handle.is_finished() {
                handle.abort();
                debug!("pending celebration timer cancelled");
            }
        }
    }
}

impl<V> Drop for Coordinator<V> {
    fn drop(&mut self) {
        if let Some(handle) = self.celebration.take() {
            handle.abort();
        }
    }
}
