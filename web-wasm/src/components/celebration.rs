//! お祝い演出（紙吹雪・花火）コンポーネント

use leptos::prelude::*;

/// 演出の色
pub const PALETTE: [&str; 5] = ["#ff6b6b", "#4ecdc4", "#45b7d1", "#f9ca24", "#f0932b"];

const CONFETTI_COUNT: usize = 50;
const FIREWORK_COUNT: usize = 10;
const CONFETTI_MAX_DELAY_SECS: f64 = 3.0;
const FIREWORK_MAX_DELAY_SECS: f64 = 2.0;

/// 演出の1粒
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: usize,
    /// 横位置（%）
    pub left: f64,
    /// 縦位置（%）
    pub top: f64,
    /// アニメーション開始の遅延（秒）
    pub delay: f64,
    pub color: &'static str,
}

/// 粒をランダムに配置
///
/// `random` は [0, 1) の値を返すこと（ブラウザでは `Math.random`）。
pub fn scatter(count: usize, max_delay: f64, mut random: impl FnMut() -> f64) -> Vec<Particle> {
    (0..count)
        .map(|id| {
            let left = random() * 100.0;
            let top = random() * 100.0;
            let delay = random() * max_delay;
            let index = ((random() * PALETTE.len() as f64) as usize).min(PALETTE.len() - 1);
            Particle {
                id,
                left,
                top,
                delay,
                color: PALETTE[index],
            }
        })
        .collect()
}

#[component]
pub fn Celebration() -> impl IntoView {
    let confetti = scatter(CONFETTI_COUNT, CONFETTI_MAX_DELAY_SECS, js_sys::Math::random);
    let fireworks = scatter(FIREWORK_COUNT, FIREWORK_MAX_DELAY_SECS, js_sys::Math::random);

    view! {
        <div class="celebration">
            {confetti
                .into_iter()
                .map(|p| {
                    let style = format!(
                        "left: {:.2}%; animation-delay: {:.2}s; background-color: {}",
                        p.left, p.delay, p.color
                    );
                    view! { <div class="confetti" style=style /> }
                })
                .collect_view()}
            {fireworks
                .into_iter()
                .map(|p| {
                    let style = format!(
                        "left: {:.2}%; top: {:.2}%; animation-delay: {:.2}s; background-color: {}",
                        p.left, p.top, p.delay, p.color
                    );
                    view! { <div class="fireworks" style=style /> }
                })
                .collect_view()}
        </div>
    }
}
