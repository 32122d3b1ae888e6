//! Safety & cleanup
//!
//! Run-scoped scratch space for judge artifacts.

pub mod workspace;

pub use workspace::Workspace;
