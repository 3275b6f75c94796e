use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "color-forms")]
#[command(about = "色リスト入力フォーム（重複チェック付き）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 色の値リストを検証して送信
    Variants {
        /// 色の値（省略時は空エントリ1件）
        values: Vec<String>,
    },

    /// 色名と画像のペアを検証して送信
    Colors {
        /// エントリ（NAME または NAME=画像パス）
        #[arg(short, long = "entry", value_name = "NAME[=IMAGE]")]
        entries: Vec<EntrySpec>,
    },

    /// フォーム状態JSONを検証
    Check {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// フォーム種別 (variants/colors)
        #[arg(short, long, default_value = "colors")]
        form: FormKind,
    },

    /// 対話的にリストを編集して送信
    Edit {
        /// フォーム種別（省略時は設定値）
        #[arg(short, long)]
        form: Option<FormKind>,

        /// 編集を始める下書きJSON
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// ログレベルを設定
        #[arg(long)]
        set_log_level: Option<String>,

        /// 送信値の書き出し先フォルダを設定
        #[arg(long)]
        set_submit_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// フォーム種別
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Variants,
    #[default]
    Colors,
}

impl std::str::FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "variants" | "variant" | "v" => Ok(FormKind::Variants),
            "colors" | "color" | "c" => Ok(FormKind::Colors),
            _ => Err(format!("Unknown form: {}. Use variants or colors", s)),
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormKind::Variants => write!(f, "variants"),
            FormKind::Colors => write!(f, "colors"),
        }
    }
}

/// `colors --entry`の1件
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntrySpec {
    pub name: String,
    pub image: Option<PathBuf>,
}

impl std::str::FromStr for EntrySpec {
    type Err = String;

    /// 最初の`=`で色名と画像パスに分ける。色名は空でもよい（検証で弾く）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((_, "")) => Err(format!("画像パスが空です: {}", s)),
            Some((name, path)) => Ok(EntrySpec {
                name: name.to_string(),
                image: Some(PathBuf::from(path)),
            }),
            None => Ok(EntrySpec {
                name: s.to_string(),
                image: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_kind_from_str() {
        assert_eq!("colors".parse::<FormKind>(), Ok(FormKind::Colors));
        assert_eq!("Variants".parse::<FormKind>(), Ok(FormKind::Variants));
        assert!("sizes".parse::<FormKind>().is_err());
    }

    #[test]
    fn test_entry_spec_from_str() {
        assert_eq!(
            "red=img/red.png".parse::<EntrySpec>(),
            Ok(EntrySpec { name: "red".into(), image: Some(PathBuf::from("img/red.png")) })
        );
        assert_eq!(
            "red".parse::<EntrySpec>(),
            Ok(EntrySpec { name: "red".into(), image: None })
        );
        assert_eq!(
            "=a.png".parse::<EntrySpec>(),
            Ok(EntrySpec { name: "".into(), image: Some(PathBuf::from("a.png")) })
        );
        assert!("red=".parse::<EntrySpec>().is_err());
    }

    #[test]
    fn test_parse_colors_command() {
        let cli = Cli::try_parse_from([
            "color-forms", "colors", "-e", "red=red.png", "--entry", "blue",
        ])
        .unwrap();
        match cli.command {
            Commands::Colors { entries } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[1].name, "blue");
            }
            _ => panic!("colorsコマンドのはず"),
        }
    }

    #[test]
    fn test_parse_variants_with_verbose() {
        let cli = Cli::try_parse_from(["color-forms", "variants", "red", "blue", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Variants { values } => assert_eq!(values, vec!["red", "blue"]),
            _ => panic!("variantsコマンドのはず"),
        }
    }
}
