pub mod paths;
pub mod storage;

pub use paths::MarketLensPaths;
pub use storage::{ConfigStorage, ConfigStorageError, SecretStorage, SecretStorageError};
