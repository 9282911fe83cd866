pub mod field_error;
pub mod input_checkbox;
pub mod input_text;
