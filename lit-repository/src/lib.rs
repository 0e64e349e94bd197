//! The repository engine: the index file, forward/inverse/rollback/
//! checkout/switch operations, ancestry search, rebase, the shelf, and
//! cache GC.

mod ancestry;
mod error;
mod gc;
mod log_view;
mod operations;
mod rebase;
mod repository;
mod shelf;

pub use ancestry::{common_ancestor, index_of};
pub use error::RepositoryError;
pub use gc::scan_object_cache;
pub use log_view::{log_view, CommitSummary, LogView};
pub use operations::{apply_forward, apply_inverse, checkout, rollback, switch};
pub use rebase::{is_conflicting, is_rebase_possible, rebase as rebase_branch, RebaseCheck};
pub use repository::Repository;
pub use shelf::{collect_shelved, consume_shelved, count_shelved, write_to_shelved};
