//! 検索フォームコンポーネント

use leptos::prelude::*;
use results_lookup_common::{Phase, SearchState};
use web_sys::KeyboardEvent;

#[component]
pub fn SearchForm<FI, FS>(
    state: ReadSignal<SearchState>,
    on_input: FI,
    on_submit: FS,
) -> impl IntoView
where
    FI: Fn(String) + 'static + Clone,
    FS: Fn(()) + 'static + Clone,
{
    let verifying = move || state.with(|s| s.phase == Phase::Verifying);
    let input_blank = move || state.with(|s| s.input_value.trim().is_empty());

    view! {
        <div class="search-card">
            <h2>"🔍 Find your result"</h2>

            <div class="form-group">
                <label for="exam-number">"Exam number"</label>
                <input
                    type="text"
                    id="exam-number"
                    placeholder="Enter your exam number..."
                    prop:value=move || state.with(|s| s.input_value.clone())
                    disabled=verifying
                    on:input={
                        let on_input = on_input.clone();
                        move |ev| on_input(event_target_value(&ev))
                    }
                    on:keydown={
                        let on_submit = on_submit.clone();
                        // 入力が空でもEnterは送信する（入力エラーを表示するため）
                        move |ev: KeyboardEvent| {
                            if ev.key() == "Enter" {
                                on_submit(());
                            }
                        }
                    }
                />
            </div>

            <Show when=move || state.with(|s| s.error_message.is_some())>
                <div class="error-message">
                    {move || state.with(|s| s.error_message.clone().unwrap_or_default())}
                </div>
            </Show>

            <button
                class="btn btn-primary"
                disabled=move || verifying() || input_blank()
                on:click={
                    let on_submit = on_submit.clone();
                    move |_| on_submit(())
                }
            >
                {move || if verifying() { "Verifying subscription..." } else { "Find result" }}
            </button>

            <div class="subscription-note">
                <p>"You must subscribe to the Telegram channel to get your result"</p>
                <a href="https://t.me/dveIQ" target="_blank" rel="noopener noreferrer">
                    "@dveIQ"
                </a>
            </div>
        </div>
    }
}
