//! Foundation I/O utilities shared across the lit engine: line-oriented
//! file read/write, path-ensuring mkdir, line-ending cleanup, and
//! non-recursive/recursive directory enumeration with mtimes.

mod error;
pub mod io;
pub mod walk;

pub use error::UtilError;
pub use lit_hash::hex::{hex_to_bytes, hex_to_string};
