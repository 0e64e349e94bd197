//! The diff engine: LCS line comparison, the `Diff`/`Line`/`DiffKind`
//! record types, forward/inverse application to a working tree, and the
//! on-disk diff object codec.

mod codec;
mod diff;
mod error;
mod lcs;

pub use codec::{decode, encode, object_path, read, write};
pub use diff::{clean, forward_projection, inverse_projection, Diff, DiffKind, Line};
pub use error::DiffError;
pub use lcs::lcs_diff;
