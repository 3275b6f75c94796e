//! 対話式リスト編集
//!
//! 1行コマンドで行の追加・編集・削除を行い、送信できるまで繰り返す。

use crate::error::Result;
use crate::media;
use crate::report::{format_rows, print_errors};
use color_forms_common::{
    ColorEntry, FormEntry, FormSession, SubmitOutcome, SubmitSink, UploadedFile, VariantEntry,
};
use dialoguer::Input;
use std::path::{Path, PathBuf};

pub const HELP: &str = "操作: [a]追加 [e N 値]編集 [i N パス]画像 [r N]削除 [m N M]移動 [l]一覧 [w パス]下書き保存 [s]送信 [q]終了";

/// 対話で編集できるエントリ
pub trait EditableEntry: FormEntry {
    fn describe(&self) -> String;

    fn set_key(&mut self, value: String);

    /// 画像欄を持たないフォームは`false`
    fn attach(&mut self, _file: UploadedFile) -> bool {
        false
    }
}

impl EditableEntry for VariantEntry {
    fn describe(&self) -> String {
        format!("\"{}\"", self.value)
    }

    fn set_key(&mut self, value: String) {
        self.value = value;
    }
}

impl EditableEntry for ColorEntry {
    fn describe(&self) -> String {
        let image = match &self.image {
            None => "画像なし".to_string(),
            Some(image) => match image.as_file() {
                Some(file) => format!("{} ({})", file.name, file.media_type),
                None => "ファイル以外".to_string(),
            },
        };
        format!("\"{}\" / {}", self.name, image)
    }

    fn set_key(&mut self, value: String) {
        self.name = value;
    }

    fn attach(&mut self, file: UploadedFile) -> bool {
        self.image = Some(file.into());
        true
    }
}

/// 1行コマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Add,
    Set { index: usize, value: String },
    Attach { index: usize, path: PathBuf },
    Remove(usize),
    Move { from: usize, to: usize },
    List,
    Save(PathBuf),
    Submit,
    Quit,
    Help,
}

fn parse_index(token: Option<&str>) -> std::result::Result<usize, String> {
    let token = token.ok_or_else(|| "行番号がありません".to_string())?;
    token
        .parse()
        .map_err(|_| format!("行番号が不正: {}", token))
}

/// コマンド行を解釈する
pub fn parse_action(line: &str) -> std::result::Result<EditAction, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim_start()),
        None => (line, ""),
    };

    match command {
        "a" | "add" => Ok(EditAction::Add),
        "e" | "edit" => {
            // 値は空白を含めてそのまま使う（空にするのも可）
            let (index, value) = rest.split_once(' ').unwrap_or((rest, ""));
            Ok(EditAction::Set {
                index: parse_index(Some(index).filter(|s| !s.is_empty()))?,
                value: value.to_string(),
            })
        }
        "i" | "image" => {
            let (index, path) = rest
                .split_once(' ')
                .ok_or_else(|| "画像パスがありません".to_string())?;
            Ok(EditAction::Attach {
                index: parse_index(Some(index))?,
                path: PathBuf::from(path.trim()),
            })
        }
        "r" | "remove" => Ok(EditAction::Remove(parse_index(rest.split_whitespace().next())?)),
        "m" | "move" => {
            let mut tokens = rest.split_whitespace();
            Ok(EditAction::Move {
                from: parse_index(tokens.next())?,
                to: parse_index(tokens.next())?,
            })
        }
        "l" | "list" | "" => Ok(EditAction::List),
        "w" | "write" if !rest.is_empty() => Ok(EditAction::Save(PathBuf::from(rest))),
        "w" | "write" => Err("保存先パスがありません".to_string()),
        "s" | "submit" => Ok(EditAction::Submit),
        "q" | "quit" => Ok(EditAction::Quit),
        "?" | "h" | "help" => Ok(EditAction::Help),
        other => Err(format!("不明な操作: {}", other)),
    }
}

/// 操作を適用した後の進み方
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Continue(String),
    Submitted(SubmitOutcome),
    Quit,
}

/// 操作を1つ適用する
///
/// 範囲外の行番号はリストを変えずにメッセージだけ返す。
pub fn apply_action<E: EditableEntry>(
    session: &mut FormSession<E>,
    action: EditAction,
    sink: &mut dyn SubmitSink,
) -> Result<Step> {
    let fields = session.fields_mut();
    let message = match action {
        EditAction::Add => {
            fields.append_blank();
            format!("→ [{}] を追加", fields.len() - 1)
        }
        EditAction::Set { index, value } => {
            if fields.update_with(index, |entry| entry.set_key(value)) {
                format!("→ [{}] を更新", index)
            } else {
                format!("→ [{}] はありません", index)
            }
        }
        EditAction::Attach { index, path } => {
            if index >= fields.len() {
                format!("→ [{}] はありません", index)
            } else {
                match media::load_upload(&path) {
                    Ok(file) => {
                        let mut supported = true;
                        fields.update_with(index, |entry| supported = entry.attach(file));
                        if supported {
                            format!("→ [{}] に画像を設定", index)
                        } else {
                            "→ このフォームには画像欄がありません".to_string()
                        }
                    }
                    Err(err) => format!("→ {}", err),
                }
            }
        }
        EditAction::Remove(index) => match fields.remove(index) {
            Some(_) => format!("→ [{}] を削除", index),
            None => format!("→ [{}] はありません", index),
        },
        EditAction::Move { from, to } => {
            if fields.move_row(from, to) {
                format!("→ [{}] を [{}] へ移動", from, to)
            } else {
                "→ 行番号が範囲外です".to_string()
            }
        }
        EditAction::List => String::new(),
        EditAction::Save(path) => {
            save_draft(session, &path)?;
            format!("→ 下書きを保存: {}", path.display())
        }
        EditAction::Submit => return Ok(Step::Submitted(session.submit(sink)?)),
        EditAction::Quit => return Ok(Step::Quit),
        EditAction::Help => HELP.to_string(),
    };
    Ok(Step::Continue(message))
}

/// 現在のリストを`edit --input`で読める形で保存
pub fn save_draft<E: FormEntry>(session: &FormSession<E>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&session.values()?)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn print_state<E: EditableEntry>(session: &FormSession<E>) {
    for line in format_rows(session.fields(), E::describe) {
        println!("  {}", line);
    }
    if session.errors_visible() && !session.errors().is_empty() {
        print_errors(session.errors());
    }
}

/// 対話ループ。送信できたら送信値を、途中終了なら`None`を返す
pub fn run_interactive<E: EditableEntry>(
    session: &mut FormSession<E>,
    sink: &mut dyn SubmitSink,
) -> Result<Option<SubmitOutcome>> {
    println!("📝 {} フォーム", session.form_name());
    println!("---");
    println!("{}", HELP);
    println!("---\n");

    print_state(session);

    loop {
        let line: String = Input::new()
            .with_prompt("操作")
            .allow_empty(true)
            .interact_text()?;

        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(message) => {
                println!("  {}", message);
                continue;
            }
        };

        match apply_action(session, action, sink)? {
            Step::Continue(message) => {
                if !message.is_empty() {
                    println!("  {}", message);
                }
                print_state(session);
            }
            Step::Submitted(SubmitOutcome::Blocked(errors)) => {
                println!("✗ 入力エラーがあります");
                print_errors(&errors);
            }
            Step::Submitted(outcome) => return Ok(Some(outcome)),
            Step::Quit => return Ok(None),
        }
    }
}
