//! Infrastructure layer: snapshot text parsing and re-serialization.

pub mod serializer;
pub mod source;

pub use serializer::{to_snapshot_js, to_snapshot_value};
pub use source::{SourceError, parse_snapshot_text, read_snapshot_file};
