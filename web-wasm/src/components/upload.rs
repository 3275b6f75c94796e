//! ファイル選択の読み込み

use color_forms_common::UploadedFile;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader};

use crate::console;

/// ブラウザのFileからメタデータを取り出す（data URLは未設定）
pub fn uploaded_file(file: &File) -> UploadedFile {
    UploadedFile::new(file.name(), file.type_(), file.size() as u64)
}

/// data URLとして非同期に読み込み、完了時に`on_loaded`を呼ぶ
pub fn read_data_url<F>(file: &File, on_loaded: F)
where
    F: Fn(String) + 'static,
{
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(_) => {
            console::error("FileReaderを作成できません");
            return;
        }
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Ok(result) = reader_clone.result() {
            if let Some(data_url) = result.as_string() {
                on_loaded(data_url);
            }
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if reader.read_as_data_url(file).is_err() {
        console::error(&format!("読み込みに失敗しました: {}", file.name()));
    }
}
