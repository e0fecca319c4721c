mod error;
mod json_file;
mod memory;
mod table;
mod traits;

pub mod conformance;

pub use error::{Collection, StorageError};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::ContractStore;
