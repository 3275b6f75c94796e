//! ブラウザコンソールへの送信先

use color_forms_common::{Result, SubmitSink};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsValue;

/// 送信値をブラウザのコンソールに出力する
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl SubmitSink for ConsoleSink {
    fn submit(&mut self, form: &str, values: &Value) -> Result<()> {
        let label = JsValue::from_str(&format!("{form}: submit >>"));
        web_sys::console::log_2(&label, &to_js(values));
        Ok(())
    }
}

/// JSON値をJSオブジェクトに変換。失敗したら文字列のまま出す
fn to_js(values: &Value) -> JsValue {
    values
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or_else(|_| JsValue::from_str(&values.to_string()))
}

/// コンソールにエラーを出す
pub fn error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}
