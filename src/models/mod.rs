pub mod document;
pub mod document_type;

pub use document::*;
pub use document_type::DocumentType;
