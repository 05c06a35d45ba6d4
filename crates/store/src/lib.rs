#![warn(clippy::unwrap_used)]

//! Client-side content store: typed namespaces over string key/value backends.

pub mod kv;
pub mod library;
pub mod namespace;
pub mod storage;

pub use kv::{FileStore, KvStore, MemoryStore};
pub use library::Library;
pub use namespace::Key;
pub use storage::Storage;
