//! 送信先
//!
//! 送信値は常にログへ出し、設定があればJSONファイルにも書き出す。

use crate::config::Config;
use chrono::Local;
use color_forms_common::{LogSink, SubmitSink};
use log::info;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// 送信値を`<dir>/<form>-<時刻>.json`に書き出す
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// これまでに書き出したファイル
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&self, form: &str) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d-%H%M%S%3f");
        let mut path = self.dir.join(format!("{form}-{stamp}.json"));
        let mut n = 1;
        while path.exists() || self.written.contains(&path) {
            path = self.dir.join(format!("{form}-{stamp}-{n}.json"));
            n += 1;
        }
        path
    }
}

impl SubmitSink for JsonDirSink {
    fn submit(&mut self, form: &str, values: &Value) -> color_forms_common::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.next_path(form);
        std::fs::write(&path, serde_json::to_string_pretty(values)?)?;
        info!("{form}: wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

/// 複数の送信先に順に渡す。途中で失敗したら残りは呼ばない
#[derive(Default)]
pub struct SinkChain {
    sinks: Vec<Box<dyn SubmitSink>>,
}

impl SinkChain {
    pub fn push(mut self, sink: impl SubmitSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl SubmitSink for SinkChain {
    fn submit(&mut self, form: &str, values: &Value) -> color_forms_common::Result<()> {
        for sink in &mut self.sinks {
            sink.submit(form, values)?;
        }
        Ok(())
    }
}

/// 設定から送信先を組み立てる
pub fn build_sink(config: &Config) -> SinkChain {
    let chain = SinkChain::default().push(LogSink);
    match &config.submit_dir {
        Some(dir) => chain.push(JsonDirSink::new(dir.clone())),
        None => chain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_json_dir_sink_writes_files() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut sink = JsonDirSink::new(dir.path().join("out"));
        let values = json!({ "variants": [{ "value": "red" }] });

        sink.submit("variants", &values).unwrap();
        sink.submit("variants", &values).unwrap();

        assert_eq!(sink.written().len(), 2);
        assert_ne!(sink.written()[0], sink.written()[1]);
        let content = std::fs::read_to_string(&sink.written()[0]).unwrap();
        let loaded: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded, values);
    }

    #[test]
    fn test_build_sink() {
        let mut config = Config::default();
        assert_eq!(build_sink(&config).len(), 1);

        config.submit_dir = Some(PathBuf::from("submissions"));
        assert_eq!(build_sink(&config).len(), 2);
    }
}
