#![forbid(unsafe_code)]

pub mod repository;
pub mod session_scope;
pub mod sqlite;

pub use repository::{IdentityRepository, MemoryIdentityStore, Storage, StorageError};
pub use session_scope::SessionScope;
pub use sqlite::{SqliteInitError, SqliteStore};
