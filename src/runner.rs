//! サブコマンドの実行

use crate::cli::{EntrySpec, FormKind};
use crate::config::Config;
use crate::editor::{run_interactive, EditableEntry};
use crate::error::{AppError, Result};
use crate::media;
use crate::report::{format_rows, print_errors};
use crate::sink::build_sink;
use color_forms_common::{
    safe_parse_file, ColorEntry, FormSession, SafeParse, SubmitOutcome, SubmitSink, VariantEntry,
};
use log::debug;
use std::path::Path;

/// `colors --entry`の指定からエントリを作る
pub fn color_entries(specs: &[EntrySpec]) -> Result<Vec<ColorEntry>> {
    specs
        .iter()
        .map(|spec| {
            let entry = ColorEntry::new(spec.name.clone());
            match &spec.image {
                Some(path) => Ok(entry.with_image(media::load_upload(path)?)),
                None => Ok(entry),
            }
        })
        .collect()
}

/// 値の指定がなければ空エントリ1件のセッション
fn session_from<E: EditableEntry>(entries: Vec<E>) -> FormSession<E> {
    if entries.is_empty() {
        FormSession::new()
    } else {
        FormSession::with_entries(entries)
    }
}

/// 検証して送信し、結果を表示する
pub fn submit_session<E: EditableEntry>(
    session: &mut FormSession<E>,
    sink: &mut dyn SubmitSink,
) -> Result<SubmitOutcome> {
    for line in format_rows(session.fields(), E::describe) {
        println!("  {}", line);
    }

    let outcome = session.submit(sink)?;
    match &outcome {
        SubmitOutcome::Submitted(values) => {
            debug!("submitted: {}", values);
            println!("\n✅ 送信しました（{}件）", session.fields().len());
        }
        SubmitOutcome::Blocked(errors) => {
            println!("\n✗ 入力エラー");
            print_errors(errors);
        }
    }
    Ok(outcome)
}

/// 送信できなかった場合はエラーとして終了させる
pub fn finish(outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Submitted(_) => Ok(()),
        SubmitOutcome::Blocked(errors) => Err(AppError::SubmissionBlocked(errors.message_count())),
    }
}

pub fn run_variants(values: Vec<String>, config: &Config) -> Result<SubmitOutcome> {
    println!("🎨 color-forms - variants\n");
    let mut session = session_from(values.into_iter().map(VariantEntry::new).collect());
    submit_session(&mut session, &mut build_sink(config))
}

pub fn run_colors(specs: &[EntrySpec], config: &Config) -> Result<SubmitOutcome> {
    println!("🎨 color-forms - colors\n");
    let mut session = session_from(color_entries(specs)?);
    submit_session(&mut session, &mut build_sink(config))
}

fn check_file<E: EditableEntry>(input: &Path) -> Result<bool> {
    let parsed = safe_parse_file::<E>(input)?;
    for line in format_rows(
        &color_forms_common::FieldArray::with_entries(parsed.entries().to_vec()),
        E::describe,
    ) {
        println!("  {}", line);
    }

    match parsed {
        SafeParse::Success(entries) => {
            println!("\n✅ 入力エラーなし（{}件）", entries.len());
            Ok(true)
        }
        SafeParse::Failure { errors, .. } => {
            println!("\n✗ 入力エラー");
            print_errors(&errors);
            Ok(false)
        }
    }
}

/// フォーム状態JSONを検証する。エラーなしなら`true`
pub fn run_check(input: &Path, form: FormKind) -> Result<bool> {
    println!("🔍 color-forms - check ({})\n", form);
    if !input.exists() {
        return Err(AppError::FileNotFound(input.display().to_string()));
    }
    match form {
        FormKind::Variants => check_file::<VariantEntry>(input),
        FormKind::Colors => check_file::<ColorEntry>(input),
    }
}

fn edit_form<E: EditableEntry>(input: Option<&Path>, config: &Config) -> Result<Option<SubmitOutcome>> {
    let mut session = match input {
        Some(path) => FormSession::with_entries(safe_parse_file::<E>(path)?.into_entries()),
        None => FormSession::new(),
    };
    let mut sink = build_sink(config);
    let outcome = run_interactive(&mut session, &mut sink)?;
    match &outcome {
        Some(_) => println!("\n✅ 送信しました（{}件）", session.fields().len()),
        None => println!("\n送信せずに終了しました"),
    }
    Ok(outcome)
}

pub fn run_edit(form: FormKind, input: Option<&Path>, config: &Config) -> Result<Option<SubmitOutcome>> {
    if let Some(path) = input {
        if !path.exists() {
            return Err(AppError::FileNotFound(path.display().to_string()));
        }
    }
    match form {
        FormKind::Variants => edit_form::<VariantEntry>(input, config),
        FormKind::Colors => edit_form::<ColorEntry>(input, config),
    }
}

pub fn show_config(config: &Config) {
    println!("設定:");
    println!("  ログレベル: {}", config.log_level);
    println!(
        "  送信値の書き出し先: {}",
        config
            .submit_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "未設定（ログのみ）".to_string())
    );
    println!("  既定のフォーム: {}", config.default_form);
}
