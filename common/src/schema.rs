//! フォーム状態ドキュメントの境界チェック
//!
//! 型なしのJSON（`{ "colors": [ ... ] }`）を静的なエントリ型に変換し、
//! 成功/失敗を区別した結果を返す。ルール違反で例外を投げることはしない。

use serde_json::Value;

use crate::error::{Error, Result};
use crate::validation::{validate, FormEntry, ValidationResult};

/// 境界チェックの結果
#[derive(Debug, Clone, PartialEq)]
pub enum SafeParse<E> {
    Success(Vec<E>),
    /// 読めなかったエントリは空エントリに置き換えてある
    Failure {
        entries: Vec<E>,
        errors: ValidationResult,
    },
}

impl<E> SafeParse<E> {
    pub fn is_success(&self) -> bool {
        matches!(self, SafeParse::Success(_))
    }

    pub fn entries(&self) -> &[E] {
        match self {
            SafeParse::Success(entries) => entries,
            SafeParse::Failure { entries, .. } => entries,
        }
    }

    pub fn into_entries(self) -> Vec<E> {
        match self {
            SafeParse::Success(entries) => entries,
            SafeParse::Failure { entries, .. } => entries,
        }
    }
}

/// JSON値をエントリ列として検証する
///
/// ドキュメント全体の形が違う場合だけ`Error::Schema`を返す。
pub fn safe_parse<E: FormEntry>(raw: &Value) -> Result<SafeParse<E>> {
    let object = raw
        .as_object()
        .ok_or_else(|| Error::Schema("form state must be a JSON object".into()))?;
    let list = object
        .get(E::LIST_NAME)
        .ok_or_else(|| Error::Schema(format!("`{}` is missing", E::LIST_NAME)))?
        .as_array()
        .ok_or_else(|| Error::Schema(format!("`{}` must be an array", E::LIST_NAME)))?;

    let mut entries = Vec::with_capacity(list.len());
    let mut decode_errors = Vec::new();

    for (index, item) in list.iter().enumerate() {
        match serde_json::from_value::<E>(item.clone()) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                decode_errors.push((index, format!("invalid entry: {err}")));
                entries.push(E::default());
            }
        }
    }

    let mut errors = validate(&entries);
    for (index, message) in decode_errors {
        errors.push(index, E::KEY_FIELD, message);
    }

    if errors.is_empty() {
        Ok(SafeParse::Success(entries))
    } else {
        Ok(SafeParse::Failure { entries, errors })
    }
}

/// JSON文字列から読み込む
pub fn safe_parse_str<E: FormEntry>(json: &str) -> Result<SafeParse<E>> {
    let raw: Value = serde_json::from_str(json)?;
    safe_parse(&raw)
}

/// JSONファイルから読み込む
pub fn safe_parse_file<E: FormEntry>(path: &std::path::Path) -> Result<SafeParse<E>> {
    let content = std::fs::read_to_string(path)?;
    safe_parse_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorEntry, VariantEntry};
    use crate::validation::{FILE_MUST_BE_IMAGE, VALUE_MUST_BE_UNIQUE, VALUE_REQUIRED};
    use serde_json::json;

    #[test]
    fn test_success() {
        let raw = json!({ "variants": [{ "value": "red" }, { "value": "blue" }] });
        let parsed = safe_parse::<VariantEntry>(&raw).expect("形は正しい");
        assert!(parsed.is_success());
        assert_eq!(parsed.entries().len(), 2);
    }

    #[test]
    fn test_failure_carries_errors() {
        let raw = json!({ "variants": [{ "value": "red" }, { "value": "red" }, {}] });
        match safe_parse::<VariantEntry>(&raw).expect("形は正しい") {
            SafeParse::Failure { entries, errors } => {
                assert_eq!(entries.len(), 3);
                assert_eq!(errors.first(1, "value"), Some(VALUE_MUST_BE_UNIQUE));
                assert_eq!(errors.first(2, "value"), Some(VALUE_REQUIRED));
            }
            SafeParse::Success(_) => panic!("失敗になるはず"),
        }
    }

    #[test]
    fn test_undecodable_entry_becomes_blank_with_error() {
        let raw = json!({ "variants": [{ "value": 7 }] });
        let SafeParse::Failure { entries, errors } = safe_parse::<VariantEntry>(&raw).expect("形は正しい") else {
            panic!("失敗になるはず");
        };
        assert_eq!(entries, vec![VariantEntry::default()]);
        let messages = errors.messages(0);
        assert_eq!(messages[0], VALUE_REQUIRED);
        assert!(messages[1].starts_with("invalid entry"));
    }

    #[test]
    fn test_non_file_image_is_rule_violation() {
        let raw = json!({ "colors": [{ "name": "red", "image": "red.png" }] });
        let parsed = safe_parse::<ColorEntry>(&raw).expect("形は正しい");
        let SafeParse::Failure { errors, .. } = parsed else {
            panic!("失敗になるはず");
        };
        assert_eq!(errors.first(0, "image"), Some(FILE_MUST_BE_IMAGE));
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(safe_parse::<VariantEntry>(&json!([])), Err(Error::Schema(_))));
        assert!(matches!(safe_parse::<VariantEntry>(&json!({ "colors": [] })), Err(Error::Schema(_))));
        assert!(matches!(
            safe_parse::<VariantEntry>(&json!({ "variants": {} })),
            Err(Error::Schema(_))
        ));
    }

    #[test]
    fn test_safe_parse_str_invalid_json() {
        assert!(matches!(safe_parse_str::<VariantEntry>("{"), Err(Error::Json(_))));
    }
}
