//! ContractFlow engine -- blueprints in, contracts through their lifecycle.
//!
//! The engine owns every rule of the system:
//!
//! - [`blueprint`]: creation gating for blueprint schemas and the
//!   per-field-type placeholders used by document previews.
//! - [`lifecycle`]: the contract status state machine and the lock rule
//!   that freezes field values in terminal states.
//! - [`draft`]: the working copy that stages field edits until they are
//!   committed, alone or together with a status transition.
//! - [`report`]: status-group counts, search, dashboard rows and the
//!   lifecycle timeline.
//!
//! [`Engine`] is the collaborator surface. It applies those rules and reads
//! and writes through any [`contractflow_storage::ContractStore`].

pub mod blueprint;
pub mod clock;
pub mod config;
pub mod draft;
pub mod engine;
pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod report;

pub use blueprint::{render_field_placeholder, BlueprintDraft, NewField};
pub use clock::{Clock, SystemClock};
pub use config::{read_engine_config, ConfigError, EngineConfig};
pub use draft::DraftContract;
pub use engine::Engine;
pub use error::EngineError;
pub use ids::{IdGenerator, RandomIds};
pub use report::{GroupCounts, GroupFilter, StatusGroup};
