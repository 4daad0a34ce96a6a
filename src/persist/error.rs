use crate::core::error::RulesError;

/// Failure to read or write saved state.
#[derive(Debug)]
pub enum PersistError {
    /// Flat save payload is not valid JSON for `SavedGame`.
    Json(serde_json::Error),
    /// Binary snapshot could not be encoded or decoded.
    Snapshot(bincode::Error),
    /// Backing store I/O failed.
    Io(std::io::Error),
    /// A field violates a rule invariant.
    Rules(RulesError),
    /// Payload parsed but describes an impossible game.
    Invalid(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Json(e) => write!(f, "malformed save: {e}"),
            PersistError::Snapshot(e) => write!(f, "malformed snapshot: {e}"),
            PersistError::Io(e) => write!(f, "save store: {e}"),
            PersistError::Rules(e) => write!(f, "invalid saved state: {e}"),
            PersistError::Invalid(msg) => write!(f, "invalid saved state: {msg}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Json(e) => Some(e),
            PersistError::Snapshot(e) => Some(e),
            PersistError::Io(e) => Some(e),
            PersistError::Rules(e) => Some(e),
            PersistError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Json(e)
    }
}

impl From<bincode::Error> for PersistError {
    fn from(e: bincode::Error) -> Self {
        PersistError::Snapshot(e)
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<RulesError> for PersistError {
    fn from(e: RulesError) -> Self {
        PersistError::Rules(e)
    }
}
