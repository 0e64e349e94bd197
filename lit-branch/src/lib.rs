//! Branch and tag records: ordered commit histories with a head index, and
//! named pointers from a branch to one of its commits.

mod branch;
mod error;
mod tag;

pub use branch::Branch;
pub use error::BranchError;
pub use tag::{filter_tags, read_all as read_all_tags, Tag};
