pub mod file_filter;
pub mod tree_walker;

pub use file_filter::FileFilter;
pub use tree_walker::{Candidates, EntryKind, FileCandidate, TreeWalker};
