//! 重複検出
//!
//! キー列を先頭から走査し、既出の値と一致したインデックスを返す。
//! 最初の出現は重複扱いしない。比較は完全一致（大文字小文字を区別）。

use std::collections::{BTreeSet, HashSet};

/// 先に出現した値と重複しているインデックスを返す
pub fn find_duplicate_indices<S: AsRef<str>>(keys: &[S]) -> BTreeSet<usize> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicates = BTreeSet::new();

    for (index, key) in keys.iter().enumerate() {
        if !seen.insert(key.as_ref()) {
            duplicates.insert(index);
        }
    }

    duplicates
}
