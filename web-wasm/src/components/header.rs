//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"🎓 Student Results"</h1>
            <p class="subtitle">"Official examination results"</p>
        </header>
    }
}
