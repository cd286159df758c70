pub mod masked;
pub mod text_edit;
