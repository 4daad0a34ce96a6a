//! Save and resume.
//!
//! - `SavedGame`: the flat JSON save record
//! - `SaveStore`: one save slot (`MemoryStore`, `FileStore`)
//! - `PersistError`: every way reading or writing saved state can fail
//!
//! Binary snapshots of the full session state live on
//! [`GameState`](crate::core::GameState).

pub mod error;
pub mod saved;
pub mod store;

pub use error::PersistError;
pub use saved::SavedGame;
pub use store::{FileStore, MemoryStore, SaveStore};
