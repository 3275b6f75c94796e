//! カラーフォーム
//!
//! 名前と画像の組を並べる。画像はdata URLとして読み込み、読み込み完了時は
//! 行IDで書き戻すので、その間に行が削除・移動されても他の行を上書きしない。

use color_forms_common::{Attachment, ColorEntry, FormSession, RowId};
use leptos::prelude::*;
use web_sys::HtmlInputElement;

use crate::components::field_error::FieldError;
use crate::components::upload::{read_data_url, uploaded_file};
use crate::console::{self, ConsoleSink};

#[component]
pub fn ColorsForm() -> impl IntoView {
    let session = RwSignal::new(FormSession::<ColorEntry>::new());

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
            <h2>"Colors"</h2>
            <For
                each=row_ids
                key=|id| *id
                children=move |id| view! { <ColorRow session=session id=id /> }
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
fn ColorRow(session: RwSignal<FormSession<ColorEntry>>, id: RowId) -> impl IntoView {
    let entry = move || {
        session.with(|s| {
            s.fields()
                .position(id)
                .and_then(|index| s.fields().get(index))
                .cloned()
                .unwrap_or_default()
        })
    };

    let error_for = move |field: &'static str| {
        move || {
            session.with(|s| {
                s.fields()
                    .position(id)
                    .and_then(|index| s.visible_error(index, field))
                    .map(str::to_string)
            })
        }
    };

    let on_name = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        session.update(|s| {
            s.fields_mut().update_row(id, |entry| entry.name = text);
        });
    };

    let on_file = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            session.update(|s| {
                s.fields_mut().update_row(id, |entry| entry.image = None);
            });
            return;
        };

        // メタデータだけで先に検証し、プレビューは読み込み後に埋める
        let upload = uploaded_file(&file);
        let file_name = upload.name.clone();
        session.update(|s| {
            s.fields_mut().update_row(id, |entry| entry.image = Some(upload.into()));
        });

        read_data_url(&file, move |data_url| {
            session.update(|s| {
                s.fields_mut().update_row(id, |entry| {
                    if let Some(Attachment::File(current)) = entry.image.as_mut() {
                        if current.name == file_name {
                            current.data_url = Some(data_url);
                        }
                    }
                });
            });
        });
    };

    let on_remove = move |_: leptos::ev::MouseEvent| {
        session.update(|s| {
            if let Some(index) = s.fields().position(id) {
                s.fields_mut().remove(index);
            }
        });
    };

    let preview = move || {
        entry()
            .image
            .as_ref()
            .and_then(Attachment::as_file)
            .filter(|file| file.is_image())
            .and_then(|file| file.data_url.clone())
            .map(|src| view! { <img class="color-preview" src=src alt="preview" /> })
    };

    view! {
        <div class="form-row">
            <input
                type="text"
                placeholder="name"
                prop:value=move || entry().name
                on:input=on_name
            />
            <input type="file" accept="image/*" on:change=on_file />
            {preview}
            <button type="button" class="btn btn-tertiary btn-small" on:click=on_remove>
                "削除"
            </button>
            <FieldError message=error_for("name") />
            <FieldError message=error_for("image") />
        </div>
    }
}
