//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use crate::components::{
    colors_form::ColorsForm,
    header::Header,
    variants_form::VariantsForm,
};

/// メインアプリケーションコンポーネント
///
/// 2つのフォームは互いに独立した状態を持つ。
#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="container">
            <Header />
            <VariantsForm />
            <ColorsForm />
        </div>
    }
}
