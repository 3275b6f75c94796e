//! 可変長リストの編集状態
//!
//! 行の追加・削除・更新のたびにリスト全体を再検証する。
//! 範囲外のインデックスを指定した操作は何もしない（エラーにもしない）。

use log::debug;
use serde::Serialize;

use crate::validation::{validate, FormEntry, ValidationResult};

/// 描画用の行ID
///
/// 行ごとに一意で、リスト内の位置が変わっても変わらない。意味は持たない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RowId(u64);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// リストの1行
#[derive(Debug, Clone, PartialEq)]
pub struct Row<E> {
    id: RowId,
    entry: E,
}

impl<E> Row<E> {
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn entry(&self) -> &E {
        &self.entry
    }
}

/// エントリのリストと、その検証結果
#[derive(Debug, Clone)]
pub struct FieldArray<E> {
    rows: Vec<Row<E>>,
    next_id: u64,
    errors: ValidationResult,
}

impl<E: FormEntry> Default for FieldArray<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: FormEntry> FieldArray<E> {
    /// 空エントリ1件で開始する
    pub fn new() -> Self {
        Self::with_entries(vec![E::default()])
    }

    pub fn with_entries(entries: Vec<E>) -> Self {
        let mut array = Self {
            rows: Vec::with_capacity(entries.len()),
            next_id: 0,
            errors: ValidationResult::default(),
        };
        array.reset(entries);
        array
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row<E>] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.rows.get(index).map(|row| &row.entry)
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &E> + '_ {
        self.rows.iter().map(|row| &row.entry)
    }

    /// 送信・保存用にエントリを複製する
    pub fn to_entries(&self) -> Vec<E> {
        self.entries().cloned().collect()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries().map(|entry| entry.key()).collect()
    }

    /// 直近の検証結果
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// 末尾に追加
    pub fn append(&mut self, entry: E) -> RowId {
        let row = self.new_row(entry);
        let id = row.id;
        self.rows.push(row);
        debug!("{}: append {} (len={})", E::LIST_NAME, id, self.rows.len());
        self.revalidate();
        id
    }

    /// 空エントリを末尾に追加
    pub fn append_blank(&mut self) -> RowId {
        self.append(E::default())
    }

    /// 指定位置に挿入。`index == len`は末尾追加と同じ
    pub fn insert(&mut self, index: usize, entry: E) -> Option<RowId> {
        if index > self.rows.len() {
            return None;
        }
        let row = self.new_row(entry);
        let id = row.id;
        self.rows.insert(index, row);
        debug!("{}: insert {} at {}", E::LIST_NAME, id, index);
        self.revalidate();
        Some(id)
    }

    /// 削除。後続の行は1つ前に詰める
    pub fn remove(&mut self, index: usize) -> Option<E> {
        if index >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(index);
        debug!("{}: remove {} at {}", E::LIST_NAME, row.id, index);
        self.revalidate();
        Some(row.entry)
    }

    /// エントリを丸ごと置き換える
    pub fn update(&mut self, index: usize, entry: E) -> bool {
        self.update_with(index, |current| *current = entry)
    }

    /// 現在のエントリをその場で書き換える
    pub fn update_with<F>(&mut self, index: usize, f: F) -> bool
    where
        F: FnOnce(&mut E),
    {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        f(&mut row.entry);
        debug!("{}: update {} at {}", E::LIST_NAME, row.id, index);
        self.revalidate();
        true
    }

    /// 行IDで書き換える
    ///
    /// 非同期のファイル読み込み完了時など、位置が変わっているかもしれない場合に使う。
    /// 行がすでに削除されていれば何もしない。
    pub fn update_row<F>(&mut self, id: RowId, f: F) -> bool
    where
        F: FnOnce(&mut E),
    {
        match self.position(id) {
            Some(index) => self.update_with(index, f),
            None => {
                debug!("{}: {} is gone, update skipped", E::LIST_NAME, id);
                false
            }
        }
    }

    /// 行の並び替え
    pub fn move_row(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rows.len() || to >= self.rows.len() {
            return false;
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        self.revalidate();
        true
    }

    /// 全行を置き換える（行IDは振り直し）
    pub fn reset(&mut self, entries: Vec<E>) {
        let rows: Vec<Row<E>> = entries.into_iter().map(|entry| self.new_row(entry)).collect();
        self.rows = rows;
        self.revalidate();
    }

    /// リスト全体を再検証する
    pub fn revalidate(&mut self) -> &ValidationResult {
        let entries = self.to_entries();
        self.errors = validate(&entries);
        &self.errors
    }

    fn new_row(&mut self, entry: E) -> Row<E> {
        let id = RowId(self.next_id);
        self.next_id += 1;
        Row { id, entry }
    }
}
