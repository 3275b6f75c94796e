//! Color Forms Common Library
//!
//! CLIとWeb(WASM)で共有されるエントリ型・リスト編集・入力チェック

pub mod types;
pub mod error;
pub mod duplicates;
pub mod validation;
pub mod field_array;
pub mod schema;
pub mod session;

pub use types::{Attachment, ColorEntry, UploadedFile, VariantEntry};
pub use error::{Error, Result};
pub use duplicates::find_duplicate_indices;
pub use validation::{validate, FieldErrors, FormEntry, ValidationResult};
pub use field_array::{FieldArray, Row, RowId};
pub use schema::{safe_parse, safe_parse_str, SafeParse};
pub use schema::safe_parse_file;
pub use session::{FormSession, LogSink, SubmitOutcome, SubmitSink};
