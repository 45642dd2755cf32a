mod persistence;
mod store;

pub use persistence::SessionStorage;
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};
