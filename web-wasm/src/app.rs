//! メインアプリケーションコンポーネント

use std::sync::Arc;

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use results_lookup_common::{
    Dataset, Resolution, SearchSession, SearchState, Submission, Verifier, CELEBRATION_WINDOW,
};

use crate::components::{
    celebration::Celebration, header::Header, result_card::ResultCard, search_form::SearchForm,
};
use crate::verifier::TimerVerifier;

const STUDENTS_JSON: &str = include_str!("../../data/students.json");

/// データセットを読み込む
///
/// 空のデータセットは照会が必ず「該当なし」になるため、読み込み失敗として扱う。
fn parse_dataset(json: &str) -> Result<Dataset, String> {
    let dataset = Dataset::from_json_str(json).map_err(|e| e.to_string())?;
    if dataset.is_empty() {
        return Err("dataset has no records".to_string());
    }
    Ok(dataset)
}

#[component]
pub fn App() -> impl IntoView {
    match parse_dataset(STUDENTS_JSON) {
        Ok(dataset) => {
            web_sys::console::log_1(&format!("dataset loaded: {} records", dataset.len()).into());
            view! { <Lookup dataset=Arc::new(dataset) /> }.into_any()
        }
        Err(message) => {
            web_sys::console::error_1(&format!("failed to load dataset: {message}").into());
            view! { <DatasetUnavailable message=message /> }.into_any()
        }
    }
}

/// データセットを読み込めなかった場合の表示（検索フォームは出さない）
#[component]
fn DatasetUnavailable(message: String) -> impl IntoView {
    view! {
        <div class="container">
            <Header />
            <div class="error-message">
                <p>"Results are unavailable right now. Please try again later."</p>
                <p class="text-muted">{message}</p>
            </div>
        </div>
    }
}

#[component]
fn Lookup(dataset: Arc<Dataset>) -> impl IntoView {
    let verifier = TimerVerifier::default();

    let session = StoredValue::new(SearchSession::new());
    // drop でタイマーが解除される
    let celebration_timer = StoredValue::new_local(None::<Timeout>);
    let (state, set_state) = signal(SearchState::default());

    let publish = move || {
        if let Some(snapshot) = session.try_with_value(|s| s.state().clone()) {
            set_state.set(snapshot);
        }
    };

    let on_input = move |value: String| {
        session.update_value(|s| s.set_input(&value));
        publish();
    };

    let on_submit = move |_: ()| {
        celebration_timer.set_value(None);

        let input = state.with_untracked(|s| s.input_value.clone());
        let submitted = session.try_update_value(|s| s.submit(&input));
        publish();

        let attempt = match submitted {
            Some(Ok(Submission::Verify(attempt))) => attempt,
            // 空入力・確認中の再送信
            _ => return,
        };

        let dataset = Arc::clone(&dataset);
        spawn_local(async move {
            let verdict = verifier.verify(attempt.identifier()).await;
            if let Err(e) = &verdict {
                web_sys::console::warn_1(&format!("verification failed: {e}").into());
            }

            let resolution =
                session.try_update_value(|s| s.resolve(&attempt, verdict, dataset.records()));
            publish();

            if let Some(Resolution::Found(token)) = resolution {
                let millis = CELEBRATION_WINDOW.as_millis() as u32;
                let timeout = Timeout::new(millis, move || {
                    if session
                        .try_update_value(|s| s.end_celebration(token))
                        .unwrap_or(false)
                    {
                        publish();
                    }
                });
                celebration_timer.set_value(Some(timeout));
            }
        });
    };

    // ページ破棄時は確認中の試行を取り消す
    on_cleanup(move || {
        session.try_update_value(|s| s.cancel());
    });

    let matched = Memo::new(move |_| state.with(|s| s.matched_record.clone()));

    view! {
        <Show when=move || state.with(|s| s.celebration_active)>
            <Celebration />
        </Show>

        <div class="container">
            <Header />

            <main class="main-content">
                <SearchForm state=state on_input=on_input on_submit=on_submit />

                {move || matched.get().map(|record| view! { <ResultCard record=record /> })}
            </main>

            <footer class="footer">
                <p>"Student Results Lookup"</p>
            </footer>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_dataset_parses() {
        let dataset = parse_dataset(STUDENTS_JSON).expect("同梱データの読み込み失敗");
        assert!(dataset.find("12345").is_some());
    }

    #[test]
    fn test_invalid_dataset_is_reported() {
        let err = parse_dataset("{ not json").unwrap_err();
        assert!(err.starts_with("JSON error"), "{err}");
    }

    #[test]
    fn test_empty_dataset_is_reported() {
        assert_eq!(
            parse_dataset("[]").unwrap_err(),
            "dataset has no records"
        );
    }
}
