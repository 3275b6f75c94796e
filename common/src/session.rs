//! フォームセッションと送信
//!
//! 送信前に必ず再検証し、エラーが残っていれば送信先を呼ばない。

use log::{info, warn};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::field_array::FieldArray;
use crate::validation::{FormEntry, ValidationResult};

/// 検証済みの送信値を受け取る先
pub trait SubmitSink {
    fn submit(&mut self, form: &str, values: &Value) -> Result<()>;
}

impl<F> SubmitSink for F
where
    F: FnMut(&str, &Value) -> Result<()>,
{
    fn submit(&mut self, form: &str, values: &Value) -> Result<()> {
        self(form, values)
    }
}

/// 送信値をログに出すだけの送信先
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SubmitSink for LogSink {
    fn submit(&mut self, form: &str, values: &Value) -> Result<()> {
        info!("{form}: submit >> {values}");
        Ok(())
    }
}

/// 送信結果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 送信先に渡した値
    Submitted(Value),
    /// エラーが残っていたので送信しなかった
    Blocked(ValidationResult),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// 1回分のフォーム編集セッション
#[derive(Debug, Clone)]
pub struct FormSession<E> {
    fields: FieldArray<E>,
    submit_count: u32,
}

impl<E: FormEntry> Default for FormSession<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: FormEntry> FormSession<E> {
    /// 空エントリ1件で開始
    pub fn new() -> Self {
        Self::from_fields(FieldArray::new())
    }

    pub fn with_entries(entries: Vec<E>) -> Self {
        Self::from_fields(FieldArray::with_entries(entries))
    }

    fn from_fields(fields: FieldArray<E>) -> Self {
        Self {
            fields,
            submit_count: 0,
        }
    }

    pub fn form_name(&self) -> &'static str {
        E::LIST_NAME
    }

    pub fn fields(&self) -> &FieldArray<E> {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldArray<E> {
        &mut self.fields
    }

    pub fn errors(&self) -> &ValidationResult {
        self.fields.errors()
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// 初回送信までは画面にエラーを出さない。以降は変更のたびに追従する
    pub fn errors_visible(&self) -> bool {
        self.submit_count > 0
    }

    /// 画面に出すエラー（まだ見せない段階なら`None`）
    pub fn visible_error(&self, index: usize, field: &str) -> Option<&str> {
        if !self.errors_visible() {
            return None;
        }
        self.fields.errors().first(index, field)
    }

    /// `{ "<リスト名>": [...] }`形式の送信値
    pub fn values(&self) -> Result<Value> {
        let entries = serde_json::to_value(self.fields.to_entries())?;
        let mut map = Map::new();
        map.insert(E::LIST_NAME.to_string(), entries);
        Ok(Value::Object(map))
    }

    /// 再検証してから送信する
    pub fn submit<S>(&mut self, sink: &mut S) -> Result<SubmitOutcome>
    where
        S: SubmitSink + ?Sized,
    {
        self.submit_count += 1;

        self.fields.revalidate();
        let errors = self.fields.errors();
        if !errors.is_empty() {
            warn!(
                "{}: submit blocked ({} of {} entries invalid)",
                E::LIST_NAME,
                errors.len(),
                self.fields.len()
            );
            return Ok(SubmitOutcome::Blocked(errors.clone()));
        }

        let values = self.values()?;
        sink.submit(E::LIST_NAME, &values)?;
        Ok(SubmitOutcome::Submitted(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorEntry, UploadedFile, VariantEntry};
    use crate::validation::VALUE_MUST_BE_UNIQUE;
    use serde_json::json;

    fn color(name: &str) -> ColorEntry {
        ColorEntry::new(name).with_image(UploadedFile::new(format!("{name}.png"), "image/png", 1))
    }

    #[test]
    fn test_duplicate_blocks_then_remove_submits() {
        let mut session = FormSession::with_entries(vec![color("red"), color("blue"), color("red")]);
        let mut calls = Vec::new();

        let outcome = session
            .submit(&mut |form: &str, values: &Value| -> Result<()> {
                calls.push((form.to_string(), values.clone()));
                Ok(())
            })
            .expect("送信処理");
        match outcome {
            SubmitOutcome::Blocked(errors) => {
                assert_eq!(errors.indices(), vec![2]);
                assert_eq!(errors.messages(2), vec![VALUE_MUST_BE_UNIQUE]);
            }
            SubmitOutcome::Submitted(_) => panic!("重複があるのに送信された"),
        }
        assert!(calls.is_empty());

        session.fields_mut().remove(2);
        assert!(session.errors().is_empty());

        let outcome = session
            .submit(&mut |form: &str, values: &Value| -> Result<()> {
                calls.push((form.to_string(), values.clone()));
                Ok(())
            })
            .expect("送信処理");
        assert!(outcome.is_submitted());
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "colors");
        assert_eq!(calls[0].1["colors"][1]["name"], "blue");
        assert_eq!(calls[0].1["colors"][0]["image"]["type"], "image/png");
    }

    #[test]
    fn test_values_shape() {
        let session = FormSession::with_entries(vec![VariantEntry::new("red")]);
        assert_eq!(session.values().expect("値"), json!({ "variants": [{ "value": "red" }] }));
    }

    #[test]
    fn test_errors_hidden_until_first_submit() {
        let mut session = FormSession::<VariantEntry>::new();
        assert!(!session.errors().is_empty());
        assert_eq!(session.visible_error(0, "value"), None);

        session.submit(&mut LogSink).expect("送信処理");
        assert_eq!(session.submit_count(), 1);
        assert!(session.visible_error(0, "value").is_some());

        // 以降は変更に追従する
        session.fields_mut().update(0, VariantEntry::new("red"));
        assert_eq!(session.visible_error(0, "value"), None);
    }

    #[test]
    fn test_sink_error_propagates() {
        let mut session = FormSession::with_entries(vec![VariantEntry::new("red")]);
        let result = session.submit(&mut |_: &str, _: &Value| -> Result<()> {
            Err(crate::error::Error::Config("sink closed".into()))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_list_submits() {
        let mut session = FormSession::<VariantEntry>::new();
        session.fields_mut().remove(0);
        let outcome = session.submit(&mut LogSink).expect("送信処理");
        assert_eq!(outcome, SubmitOutcome::Submitted(json!({ "variants": [] })));
    }

    #[test]
    fn test_dyn_sink() {
        let mut session = FormSession::with_entries(vec![VariantEntry::new("red")]);
        let mut sink: Box<dyn SubmitSink> = Box::new(LogSink);
        assert!(session.submit(sink.as_mut()).expect("送信処理").is_submitted());
    }
}
