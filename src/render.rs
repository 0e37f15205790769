//! 端末への描画
//!
//! 状態スナップショットを受け取って表示するだけで、フローには関与しない。

use indicatif::{ProgressBar, ProgressStyle};
use results_lookup_common::{Phase, SearchState};
use std::future::Future;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// 試行の終了状態を標準出力へ表示
pub fn print_state(state: &SearchState) {
    let mut out = io::stdout().lock();
    if let Err(e) = write_state(&mut out, state) {
        debug!(error = %e, "failed to write result");
    }
}

/// 試行の終了状態を書き出す
pub fn write_state<W: Write>(out: &mut W, state: &SearchState) -> io::Result<()> {
    match (state.phase, &state.matched_record) {
        (Phase::Found, Some(record)) => {
            writeln!(out, "\n🏆 Congratulations! You are among the top students 🏆")?;
            writeln!(out, "✔ Subscription verified\n")?;
            let fields = record.display_fields();
            let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
            for (label, value) in &fields {
                writeln!(out, "  {:<width$}  {}", label, value, width = width)?;
            }
            writeln!(out, "\n🎉 Well done on an outstanding result 🎉")?;
        }
        (Phase::Idle, _) => writeln!(out, "- Search cancelled")?,
        _ => {
            if let Some(message) = &state.error_message {
                writeln!(out, "✖ {}", message)?;
            }
        }
    }
    Ok(())
}

/// 終了状態からプロセスの終了コードを決める
///
/// Found のみ成功。入力エラー・該当なし・購読確認失敗・キャンセルは失敗。
pub fn exit_code(state: &SearchState) -> ExitCode {
    if state.phase == Phase::Found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// `submit` の完了を待つ間、状態が Verifying ならスピナーを表示する
///
/// スピナーは結果表示の前に必ず消去される。
pub async fn with_spinner<F>(rx: &mut watch::Receiver<SearchState>, submit: F) -> F::Output
where
    F: Future,
{
    tokio::pin!(submit);
    let mut spinner: Option<ProgressBar> = None;

    let output = loop {
        tokio::select! {
            output = &mut submit => break output,
            changed = rx.changed(), if spinner.is_none() => {
                if changed.is_err() {
                    break (&mut submit).await;
                }
                if rx.borrow_and_update().phase == Phase::Verifying {
                    spinner = Some(verifying_spinner());
                }
            }
        }
    };

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    output
}

fn verifying_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Verifying channel subscription...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use results_lookup_common::{Failure, StudentRecord};

    fn found() -> SearchState {
        SearchState {
            input_value: "12345".to_string(),
            phase: Phase::Found,
            matched_record: Some(StudentRecord {
                exam_number: "12345".to_string(),
                full_name: "Ali Hassan Kadhim Jasim".to_string(),
                average: 95.5,
                department: "Science".to_string(),
                rank: 3,
            }),
            error_message: None,
            celebration_active: true,
        }
    }

    fn failed(failure: Failure) -> SearchState {
        SearchState {
            input_value: "99999".to_string(),
            phase: failure.phase(),
            matched_record: None,
            error_message: Some(failure.message().to_string()),
            celebration_active: false,
        }
    }

    fn rendered(state: &SearchState) -> String {
        let mut out = Vec::new();
        write_state(&mut out, state).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_found_card() {
        let text = rendered(&found());

        assert!(text.contains("Congratulations"));
        assert!(text.contains("  Name         Ali Hassan Kadhim Jasim"));
        assert!(text.contains("  Exam number  12345"));
        assert!(text.contains("  Average      95.50"));
        assert!(text.contains("  Department   Science"));
        assert!(text.contains("  Rank         3"));
    }

    #[test]
    fn test_write_failures() {
        for failure in [
            Failure::EmptyInput,
            Failure::NotFound,
            Failure::NotSubscribed,
            Failure::VerificationFailed,
        ] {
            let text = rendered(&failed(failure));
            assert_eq!(text, format!("✖ {}\n", failure.message()));
        }
    }

    #[test]
    fn test_write_cancelled() {
        let state = SearchState {
            input_value: "12345".to_string(),
            ..Default::default()
        };
        assert_eq!(rendered(&state), "- Search cancelled\n");
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(&found()), ExitCode::SUCCESS);
        for failure in [
            Failure::EmptyInput,
            Failure::NotFound,
            Failure::NotSubscribed,
            Failure::VerificationFailed,
        ] {
            assert_eq!(exit_code(&failed(failure)), ExitCode::FAILURE);
        }
        assert_eq!(exit_code(&SearchState::default()), ExitCode::FAILURE);
    }
}
