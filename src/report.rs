//! 検証結果の表示

use color_forms_common::{FieldArray, FormEntry, ValidationResult};

/// `[2] name: value must be unique`形式の行
pub fn format_errors(errors: &ValidationResult) -> Vec<String> {
    errors
        .iter()
        .flat_map(|(index, fields)| {
            fields
                .iter()
                .flat_map(move |(field, messages)| {
                    messages
                        .iter()
                        .map(move |message| format!("[{}] {}: {}", index, field, message))
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// リストの現在の状態を1行ずつ
pub fn format_rows<E: FormEntry>(fields: &FieldArray<E>, describe: impl Fn(&E) -> String) -> Vec<String> {
    fields
        .entries()
        .enumerate()
        .map(|(index, entry)| {
            let mark = if fields.errors().get(index).is_some() { "✗" } else { "✓" };
            format!("{} [{}] {}", mark, index, describe(entry))
        })
        .collect()
}

pub fn print_errors(errors: &ValidationResult) {
    for line in format_errors(errors) {
        println!("  {}", line);
    }
}
