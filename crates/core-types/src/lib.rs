//! Shared primitives for the formreach autofill engine.
//!
//! Everything in here is plain data: role vocabulary, field descriptors,
//! the sender profile record, and the fill-summary rows the engine emits.
//! No crate in the workspace talks to a browser through these types.

use uuid::Uuid;

pub mod field;
pub mod profile;
pub mod roles;
pub mod summary;

pub use field::{FieldDescriptor, FieldKind};
pub use profile::{SenderProfile, DEFAULT_INQUIRY_LABEL};
pub use roles::RoleTag;
pub use summary::{FillOutcome, FilledEntry};

/// Identifier for one fill run (one page, one pass).
#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
