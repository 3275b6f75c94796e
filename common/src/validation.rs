//! 入力チェック
//!
//! 1. エントリごとのフィールドルール（必須・画像タイプ）
//! 2. エントリ横断の一意性ルール（キー欄の重複）
//!
//! 結果は毎回まるごと再計算する。インデックスのずらし補正はしない。

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::duplicates::find_duplicate_indices;

pub const VALUE_REQUIRED: &str = "value is required";
pub const NAME_REQUIRED: &str = "name is required";
pub const IMAGE_REQUIRED: &str = "image is required";
pub const FILE_MUST_BE_IMAGE: &str = "file must be an image";
pub const VALUE_MUST_BE_UNIQUE: &str = "value must be unique";

/// フォームのリストに並ぶエントリ
///
/// `Default`は「追加」ボタンで足される空エントリ。
pub trait FormEntry: Clone + Default + Serialize + DeserializeOwned {
    /// 送信値でリストを格納するキー（例: `colors`）
    const LIST_NAME: &'static str;
    /// 一意性チェックに使うフィールド名
    const KEY_FIELD: &'static str;

    fn key(&self) -> &str;

    /// エントリ単体のフィールドルールを適用する
    fn check_fields(&self, errors: &mut FieldErrors);
}

/// 1エントリ分のフィールド別エラー
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    /// フィールドのメッセージ（なければ空）
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// 画面に出す先頭メッセージ
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> + '_ {
        self.fields.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }

    /// 全フィールドのメッセージ（フィールド名順）
    pub fn messages(&self) -> Vec<&str> {
        self.fields
            .values()
            .flat_map(|messages| messages.iter().map(String::as_str))
            .collect()
    }
}

/// エントリインデックス → フィールド別エラー
///
/// 違反のないインデックスは含まない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    entries: BTreeMap<usize, FieldErrors>,
}

impl ValidationResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 違反のあるエントリ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&FieldErrors> {
        self.entries.get(&index)
    }

    pub fn messages(&self, index: usize) -> Vec<&str> {
        self.get(index).map(FieldErrors::messages).unwrap_or_default()
    }

    pub fn first(&self, index: usize, field: &str) -> Option<&str> {
        self.get(index).and_then(|errors| errors.first(field))
    }

    pub fn indices(&self) -> Vec<usize> {
        self.entries.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &FieldErrors)> + '_ {
        self.entries.iter().map(|(index, errors)| (*index, errors))
    }

    /// 全メッセージ数
    pub fn message_count(&self) -> usize {
        self.entries.values().map(|errors| errors.messages().len()).sum()
    }

    pub(crate) fn push(&mut self, index: usize, field: &'static str, message: impl Into<String>) {
        self.entries.entry(index).or_default().push(field, message);
    }

    pub(crate) fn insert(&mut self, index: usize, errors: FieldErrors) {
        if !errors.is_empty() {
            self.entries.insert(index, errors);
        }
    }
}

/// リスト全体を検証する
pub fn validate<E: FormEntry>(entries: &[E]) -> ValidationResult {
    let mut result = ValidationResult::default();

    for (index, entry) in entries.iter().enumerate() {
        let mut errors = FieldErrors::default();
        entry.check_fields(&mut errors);
        result.insert(index, errors);
    }

    let keys: Vec<&str> = entries.iter().map(|entry| entry.key()).collect();
    for index in find_duplicate_indices(&keys) {
        result.push(index, E::KEY_FIELD, VALUE_MUST_BE_UNIQUE);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attachment, ColorEntry, UploadedFile, VariantEntry};

    fn png(name: &str) -> UploadedFile {
        UploadedFile::new(format!("{name}.png"), "image/png", 128)
    }

    fn color(name: &str) -> ColorEntry {
        ColorEntry::new(name).with_image(png(name))
    }

    #[test]
    fn test_unique_list_is_valid() {
        let entries = vec![color("red"), color("blue")];
        assert!(validate(&entries).is_empty());
    }

    #[test]
    fn test_duplicate_name_flagged_after_first() {
        let entries = vec![color("red"), color("blue"), color("red")];
        let result = validate(&entries);

        assert_eq!(result.indices(), vec![2]);
        assert_eq!(result.messages(2), vec![VALUE_MUST_BE_UNIQUE]);
        assert_eq!(result.first(2, "name"), Some(VALUE_MUST_BE_UNIQUE));
    }

    #[test]
    fn test_idempotent() {
        let entries = vec![
            VariantEntry::new("red"),
            VariantEntry::new(""),
            VariantEntry::new("red"),
        ];
        assert_eq!(validate(&entries), validate(&entries));
    }

    #[test]
    fn test_required_and_unique_accumulate() {
        let entries = vec![VariantEntry::new(""), VariantEntry::new("")];
        let result = validate(&entries);

        assert_eq!(result.messages(0), vec![VALUE_REQUIRED]);
        assert_eq!(result.get(1).map(|e| e.get("value").to_vec()), Some(vec![
            VALUE_REQUIRED.to_string(),
            VALUE_MUST_BE_UNIQUE.to_string(),
        ]));
        // 画面には先頭メッセージを出す
        assert_eq!(result.first(1, "value"), Some(VALUE_REQUIRED));
    }

    #[test]
    fn test_image_rules() {
        let entries = vec![
            ColorEntry::new("red"),
            ColorEntry::new("green").with_image(UploadedFile::new("a.txt", "text/plain", 1)),
            ColorEntry::new("blue").with_image(Attachment::Other(serde_json::json!(42))),
            color("black"),
        ];
        let result = validate(&entries);

        assert_eq!(result.first(0, "image"), Some(IMAGE_REQUIRED));
        assert_eq!(result.first(1, "image"), Some(FILE_MUST_BE_IMAGE));
        assert_eq!(result.first(2, "image"), Some(FILE_MUST_BE_IMAGE));
        assert!(result.get(3).is_none());
    }

    #[test]
    fn test_empty_list_is_valid() {
        assert!(validate::<ColorEntry>(&[]).is_empty());
    }

    #[test]
    fn test_message_count() {
        let result = validate(&[ColorEntry::default(), ColorEntry::default()]);
        // 0: image, name / 1: image, name, unique
        assert_eq!(result.len(), 2);
        assert_eq!(result.message_count(), 5);
    }

    #[test]
    fn test_serialize_shape() {
        let result = validate(&[VariantEntry::new("a"), VariantEntry::new("a")]);
        let json = serde_json::to_value(&result).expect("シリアライズ失敗");
        assert_eq!(json, serde_json::json!({ "1": { "value": [VALUE_MUST_BE_UNIQUE] } }));
    }
}
