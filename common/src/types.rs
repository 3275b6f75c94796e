//! エントリ型定義
//!
//! フォームごとに静的に宣言したエントリ型:
//! - VariantEntry: 色の値だけを持つエントリ（variantsフォーム）
//! - ColorEntry: 色名と画像のペア（colorsフォーム）
//! - UploadedFile / Attachment: ファイル選択ウィジェットから渡されるペイロード

use serde::{Deserialize, Serialize};

use crate::validation::{
    FieldErrors, FormEntry, FILE_MUST_BE_IMAGE, IMAGE_REQUIRED, NAME_REQUIRED, VALUE_REQUIRED,
};

/// 画像として受け付けるメディア区分
pub const IMAGE_CATEGORY: &str = "image";

/// アップロードされたファイル
///
/// 中身は検査しない。宣言されたメディアタイプ（`type`）だけを見る。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,

    /// 宣言されたメディアタイプ（例: `image/png`）
    #[serde(rename = "type")]
    pub media_type: String,

    #[serde(default)]
    pub size: u64,

    /// プレビュー用のdata URL（ブラウザ側で読み込んだ場合のみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
            data_url: None,
        }
    }

    /// `type`の`/`より前の部分
    pub fn media_category(&self) -> &str {
        self.media_type.split('/').next().unwrap_or_default()
    }

    pub fn is_image(&self) -> bool {
        self.media_category() == IMAGE_CATEGORY
    }
}

/// ペイロード欄に渡された値
///
/// ファイル以外の値もそのまま保持し、型違反として報告する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attachment {
    File(UploadedFile),
    Other(serde_json::Value),
}

impl Attachment {
    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            Attachment::File(file) => Some(file),
            Attachment::Other(_) => None,
        }
    }

    pub fn is_image(&self) -> bool {
        self.as_file().is_some_and(UploadedFile::is_image)
    }
}

impl From<UploadedFile> for Attachment {
    fn from(file: UploadedFile) -> Self {
        Attachment::File(file)
    }
}

/// variantsフォームのエントリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantEntry {
    pub value: String,
}

impl VariantEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

impl FormEntry for VariantEntry {
    const LIST_NAME: &'static str = "variants";
    const KEY_FIELD: &'static str = "value";

    fn key(&self) -> &str {
        &self.value
    }

    fn check_fields(&self, errors: &mut FieldErrors) {
        if self.value.is_empty() {
            errors.push(Self::KEY_FIELD, VALUE_REQUIRED);
        }
    }
}

/// colorsフォームのエントリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorEntry {
    pub image: Option<Attachment>,
    pub name: String,
}

impl ColorEntry {
    pub const IMAGE_FIELD: &'static str = "image";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            image: None,
            name: name.into(),
        }
    }

    pub fn with_image(mut self, image: impl Into<Attachment>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl FormEntry for ColorEntry {
    const LIST_NAME: &'static str = "colors";
    const KEY_FIELD: &'static str = "name";

    fn key(&self) -> &str {
        &self.name
    }

    fn check_fields(&self, errors: &mut FieldErrors) {
        match &self.image {
            None => errors.push(Self::IMAGE_FIELD, IMAGE_REQUIRED),
            Some(image) if !image.is_image() => errors.push(Self::IMAGE_FIELD, FILE_MUST_BE_IMAGE),
            Some(_) => {}
        }

        if self.name.is_empty() {
            errors.push(Self::KEY_FIELD, NAME_REQUIRED);
        }
    }
}
