//! contractflow-model: the persisted data model for ContractFlow.
//!
//! Provides the closed enumerations ([`FieldType`], [`ContractStatus`]),
//! the two persisted record kinds ([`Blueprint`], [`Contract`]) and the
//! typed [`FieldValue`] a contract stores per field.
//!
//! Record types serialize to the camelCase JSON layout used by every
//! storage backend; see `schema/state-schema.json` at the workspace root.

mod blueprint;
mod contract;
mod error;
mod field;
mod status;

pub use blueprint::Blueprint;
pub use contract::{Contract, FieldValues};
pub use error::ModelError;
pub use field::{Field, FieldType, FieldValue};
pub use status::ContractStatus;
