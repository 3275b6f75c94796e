pub mod colors_form;
pub mod field_error;
pub mod header;
pub mod upload;
pub mod variants_form;
