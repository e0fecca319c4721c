/// Errors raised while interpreting persisted model data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A tag outside a closed enumeration, e.g. a status string written by
    /// a newer or corrupted store.
    #[error("unknown {kind} value: '{value}'")]
    UnknownEnumValue { kind: &'static str, value: String },
}
