//! バリエーションフォーム

use color_forms_common::{FormSession, RowId, VariantEntry};
use leptos::prelude::*;

use crate::components::field_error::FieldError;
use crate::console::{self, ConsoleSink};

#[component]
pub fn VariantsForm() -> impl IntoView {
    let session = RwSignal::new(FormSession::<VariantEntry>::new());

    let row_ids = move || {
        session.with(|s| s.fields().rows().iter().map(|row| row.id()).collect::<Vec<RowId>>())
    };

    let on_append = move |_: leptos::ev::MouseEvent| {
        session.update(|s| {
            s.fields_mut().append_blank();
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        session.update(|s| {
            if let Err(err) = s.submit(&mut ConsoleSink) {
                console::error(&err.to_string());
            }
        });
    };

    view! {
        <form class="form-card" on:submit=on_submit>
            <h2>"Variants"</h2>
            <For
                each=row_ids
                key=|id| *id
                children=move |id| view! { <VariantRow session=session id=id /> }
            />
            <div class="form-actions">
                <button type="button" class="btn btn-secondary" on:click=on_append>
                    "+ 追加"
                </button>
                <button type="submit" class="btn btn-primary">"送信"</button>
            </div>
        </form>
    }
}

#[component]
fn VariantRow(session: RwSignal<FormSession<VariantEntry>>, id: RowId) -> impl IntoView {
    let value = move || {
        session.with(|s| {
            s.fields()
                .position(id)
                .and_then(|index| s.fields().get(index))
                .map(|entry| entry.value.clone())
                .unwrap_or_default()
        })
    };

    let message = move || {
        session.with(|s| {
            s.fields()
                .position(id)
                .and_then(|index| s.visible_error(index, "value"))
                .map(str::to_string)
        })
    };

    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        session.update(|s| {
            s.fields_mut().update_row(id, |entry| entry.value = text);
        });
    };

    let on_remove = move |_: leptos::ev::MouseEvent| {
        session.update(|s| {
            if let Some(index) = s.fields().position(id) {
                s.fields_mut().remove(index);
            }
        });
    };

    view! {
        <div class="form-row">
            <input
                type="text"
                placeholder="value"
                prop:value=value
                on:input=on_input
            />
            <button type="button" class="btn btn-tertiary btn-small" on:click=on_remove>
                "削除"
            </button>
            <FieldError message=message />
        </div>
    }
}
