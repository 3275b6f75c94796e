//! color-forms CLI
//!
//! 共通ライブラリのフォームセッションを端末から操作する。

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod media;
pub mod report;
pub mod runner;
pub mod sink;
