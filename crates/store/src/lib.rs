//! System configuration store implementations for Parley.

pub mod entry;
pub mod file_backend;
pub mod in_memory;
pub mod noop;

pub use entry::SystemConfigEntry;
pub use file_backend::FileStore;
pub use in_memory::InMemoryStore;
pub use noop::NoopStore;
