//! Data model types for cut-list conversion.

mod occurrence;
mod record;
mod tree;

pub use occurrence::{counted_quantity, Occurrence, Occurrences};
pub use record::{CutListRecord, PartKey};
pub use tree::{TreeKey, TreeNode};
