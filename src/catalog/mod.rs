//! Catalog reduction: typed parsing of catalog lines and the streaming
//! conversion loop that writes the reduced catalog.

pub mod converter;
pub mod record;

pub use converter::{convert_file, convert_stream, format_row};
pub use record::{FIELD_COUNT, parse_record};
