//! Style records and the named style registry
//!
//! Records describe line, fill and balloon appearance. They are validated
//! field by field; the registry stores them under names that shape nodes
//! reference through `styleUrl`.

mod record;
mod registry;
pub mod validate;

pub use record::{BalloonStyle, FieldValue, LineStyle, PolyStyle, StyleRecord};
pub use registry::{StyleEntry, StyleRegistry};
