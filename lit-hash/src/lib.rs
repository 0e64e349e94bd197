//! Hashing primitives for the lit version control engine: SHA-1 labeling
//! of commits and branches, and CRC-32 labeling of diffs.
//!
//! Both algorithms are implemented from scratch here rather than pulled
//! from a crypto crate: they are part of the object model's own core, and
//! SHA-1 is explicitly not required to be collision-resistant for this
//! use — it labels, it does not authenticate.

mod crc32;
mod error;
pub mod hex;
mod sha1;

pub use crc32::{crc32, crc32_decimal, crc32_shard};
pub use error::HashError;
pub use sha1::Sha1;
