pub mod html;
pub mod text;


pub use html::{ExtractOptions, extract, parse_document, resolve_url};
pub use text::TextOptions;
