//! Services module
//!
//! Backend collaborators the dropdowns fetch their pages from.

mod directory;

pub use directory::{DirectoryClient, DirectoryRecord};
