//! CSV decoding.

mod reader;
mod text;

pub use reader::{decode_csv, ensure_shape, read_csv_headers};
pub use text::decode_text;
