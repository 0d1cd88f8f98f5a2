//! Resource providers for the estimate assembler.
//!
//! - [`FilesystemResourceProvider`]: resolves `file://` URIs and relative paths
//!
//! The in-memory provider lives in estimate-traits and is re-exported here:
//! - [`InMemoryResourceProvider`]: pre-populated in-memory storage

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use estimate_traits::InMemoryResourceProvider;
