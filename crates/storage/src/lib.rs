#![forbid(unsafe_code)]

pub mod file;
pub mod mapping;
pub mod repository;

pub use file::JsonFileStore;
pub use mapping::{decode_progress, encode_progress, progress_key};
pub use repository::{InMemoryStore, KeyValueStore, ProgressRepository, StorageError};
