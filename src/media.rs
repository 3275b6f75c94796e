//! ローカルファイルをアップロード済みファイルとして扱う
//!
//! メディアタイプは拡張子から宣言する。中身は読まない。

use crate::error::{AppError, Result};
use color_forms_common::UploadedFile;
use image::ImageFormat;
use std::path::Path;

const OCTET_STREAM: &str = "application/octet-stream";

/// 画像以外でよく選ばれる拡張子
const OTHER_MEDIA_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("mp4", "video/mp4"),
    ("mp3", "audio/mpeg"),
];

/// 拡張子からメディアタイプを決める
pub fn media_type_for(path: &Path) -> String {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    OTHER_MEDIA_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, media_type)| media_type.to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

/// ファイル選択の結果を作る
pub fn load_upload(path: &Path) -> Result<UploadedFile> {
    if !path.is_file() {
        return Err(AppError::FileNotFound(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(UploadedFile::new(name, media_type_for(path), size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_media_type_for_images() {
        assert_eq!(media_type_for(Path::new("red.png")), "image/png");
        assert_eq!(media_type_for(Path::new("red.JPG")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("red.webp")), "image/webp");
    }

    #[test]
    fn test_media_type_for_others() {
        assert_eq!(media_type_for(Path::new("notes.txt")), "text/plain");
        assert_eq!(media_type_for(Path::new("notes.PDF")), "application/pdf");
        assert_eq!(media_type_for(Path::new("noext")), OCTET_STREAM);
    }

    #[test]
    fn test_load_upload() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("blue.png");
        File::create(&path).unwrap().write_all(b"dummy").unwrap();

        let file = load_upload(&path).unwrap();
        assert_eq!(file.name, "blue.png");
        assert_eq!(file.media_type, "image/png");
        assert_eq!(file.size, 5);
        assert!(file.is_image());
    }

    #[test]
    fn test_load_upload_missing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let err = load_upload(&dir.path().join("none.png")).unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));

        // フォルダはファイルではない
        let err = load_upload(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));
    }
}
