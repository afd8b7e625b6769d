//! Record transformations: splitting, combining, tree building and width grouping.

mod combine;
mod split;
mod tree;
mod width;

pub use combine::combine;
pub use split::{line_items, split};
pub use tree::build_tree;
pub use width::{into_width_files, job_name, WidthFile};
