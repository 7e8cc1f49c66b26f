//! Resource sources.
//!
//! Sources turn a resource tree into raw `(type, key, qualifiers, path)`
//! tuples for the table builder.

pub mod scanner;
pub mod source;
pub mod values;

pub use scanner::{ResourceScanner, ScanJob};
pub use source::ResourceSource;
pub use values::{parse_values, ValueDeclaration, ValuesError};
