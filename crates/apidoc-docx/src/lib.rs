pub mod package;
pub mod render;
pub mod writer;

pub use writer::{DocxDocument, DocxFormat};
