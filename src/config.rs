use crate::cli::FormKind;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace", "off"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// env_loggerのデフォルトフィルタ（RUST_LOGが優先）
    pub log_level: String,
    /// 送信値をJSONで書き出すフォルダ（未設定ならログのみ）
    pub submit_dir: Option<PathBuf>,
    /// `edit`でフォーム未指定のときに使うフォーム
    pub default_form: FormKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            submit_dir: None,
            default_form: FormKind::Colors,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("color-forms").join("config.json"))
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<()> {
        let level = level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(AppError::Config(format!(
                "不明なログレベル: {}（{}のいずれか）",
                level,
                LOG_LEVELS.join("/")
            )));
        }
        self.log_level = level;
        Ok(())
    }

    pub fn set_submit_dir(&mut self, dir: PathBuf) {
        self.submit_dir = Some(dir);
    }
}
