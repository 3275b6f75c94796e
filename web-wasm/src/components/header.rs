//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Color Forms"</h1>
            <p class="text-muted">"バリエーションとカラーの入力フォーム"</p>
        </header>
    }
}
