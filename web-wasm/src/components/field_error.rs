//! 入力エラー表示

use leptos::prelude::*;

/// メッセージがあるときだけ表示する
#[component]
pub fn FieldError<F>(message: F) -> impl IntoView
where
    F: Fn() -> Option<String> + Send + Sync + 'static,
{
    move || {
        message().map(|message| {
            view! { <p class="field-error" role="alert">{message}</p> }
        })
    }
}
