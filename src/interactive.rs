//! 対話式の成績照会
//!
//! 1つのセッションに対して受験番号を繰り返し送信する。
//! 購読確認中の Ctrl-C はその試行のみを中断し、それ以外ではループを終える。

use crate::coordinator::Coordinator;
use crate::error::{LookupError, Result};
use crate::render;
use dialoguer::Input;
use results_lookup_common::{Phase, Verifier};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

const QUIT_WORDS: &[&str] = &["q", "quit", "exit"];

/// 対話入力の解釈
#[derive(Debug, PartialEq, Eq)]
pub enum PromptAction {
    Submit(String),
    Quit,
}

pub fn parse_answer(answer: String) -> PromptAction {
    if QUIT_WORDS.contains(&answer.trim()) {
        PromptAction::Quit
    } else {
        PromptAction::Submit(answer)
    }
}

/// Ctrl-C を受けたときの動作
#[derive(Debug, PartialEq, Eq)]
pub enum InterruptAction {
    /// 購読確認中の試行だけを中断
    CancelVerification,
    /// 次のプロンプトの前にループを抜ける
    Quit,
}

pub fn interrupt_action(phase: Phase) -> InterruptAction {
    if phase == Phase::Verifying {
        InterruptAction::CancelVerification
    } else {
        InterruptAction::Quit
    }
}

/// プロンプト中の Ctrl-C（raw モードでは SIGINT にならず読み取りエラーになる）
pub fn is_interrupt(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted)
}

pub async fn run_interactive<V: Verifier>(coordinator: &mut Coordinator<V>) -> Result<()> {
    println!("🎓 Exam results lookup");
    println!("---");
    println!("Enter an exam number. [q] or Ctrl-C to quit, Ctrl-C cancels a running check");
    println!("---\n");

    let mut rx = coordinator.subscribe();
    let quit = Arc::new(AtomicBool::new(false));
    let interrupt = spawn_interrupt_handler(coordinator, Arc::clone(&quit));

    let outcome = loop {
        if quit.load(Ordering::SeqCst) {
            break Ok(());
        }

        let answer = match prompt().await {
            Ok(Some(answer)) => answer,
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        };

        let input = match parse_answer(answer) {
            PromptAction::Quit => break Ok(()),
            PromptAction::Submit(input) => input,
        };

        match render::with_spinner(&mut rx, coordinator.submit(&input)).await {
            Ok(state) => render::print_state(&state),
            Err(e) => println!("✖ {}", e),
        }
        println!();
    };

    interrupt.abort();
    outcome
}

/// 受験番号の入力（Ctrl-C なら `None`）
async fn prompt() -> Result<Option<String>> {
    let answer = tokio::task::spawn_blocking(|| {
        Input::<String>::new()
            .with_prompt("Exam number")
            .allow_empty(true)
            .interact_text()
    })
    .await
    .map_err(|e| LookupError::Prompt(e.to_string()))?;

    match answer {
        Ok(answer) => Ok(Some(answer)),
        Err(e) if is_interrupt(&e) => Ok(None),
        Err(e) => Err(LookupError::Prompt(e.to_string())),
    }
}

fn spawn_interrupt_handler<V: Verifier>(
    coordinator: &Coordinator<V>,
    quit: Arc<AtomicBool>,
) -> tokio::task::JoinHandle<()> {
    let handle = coordinator.cancel_handle();
    let rx = coordinator.subscribe();

    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            let phase = rx.borrow().phase;
            match interrupt_action(phase) {
                InterruptAction::CancelVerification => {
                    debug!("interrupt received, cancelling verification");
                    handle.cancel();
                }
                InterruptAction::Quit => {
                    debug!(%phase, "interrupt received, leaving after the current step");
                    quit.store(true, Ordering::SeqCst);
                }
            }
        }
    })
}
