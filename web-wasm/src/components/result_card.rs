//! 結果カードコンポーネント

use leptos::prelude::*;
use results_lookup_common::StudentRecord;

#[component]
pub fn ResultCard(record: StudentRecord) -> impl IntoView {
    view! {
        <div class="result-card pulse-success">
            <div class="result-header">
                <h2>"🏆 Congratulations! You are among the top students 🏆"</h2>
                <p class="verified">"✔ Subscription verified"</p>
            </div>

            <div class="result-grid">
                <div class="result-field">
                    <h3>"⭐ Student name"</h3>
                    <p>{record.full_name.clone()}</p>
                </div>
                <div class="result-field">
                    <h3>"Exam number"</h3>
                    <p class="mono">{record.exam_number.clone()}</p>
                </div>
                <div class="result-field">
                    <h3>"🏆 Average"</h3>
                    <span class="average">{record.average_display()}</span>
                    <span class="badge">"Excellent"</span>
                </div>
                <div class="result-field">
                    <h3>"Department"</h3>
                    <p>{record.department.clone()}</p>
                </div>
            </div>

            <div class="result-rank">
                <h3>"Rank"</h3>
                <span>{format!("#{}", record.rank_display())}</span>
            </div>

            <div class="result-footer">
                <p>"🎉 Well done on an outstanding result 🎉"</p>
                <p class="text-muted">"We wish you every success in your studies"</p>
            </div>
        </div>
    }
}
