//! Form schema resolution and multi-frame autofill engine.
//!
//! Takes the classifier's field schema and a live (possibly multi-frame)
//! page behind a [`dom_port::DomPort`], and fills each logical field with
//! the right sender value: ambiguous multi-role fields, grouped
//! radio/checkbox choices, cross-frame search, and explicit degradation
//! when a field cannot be matched. Fill-only: the engine never submits.

pub mod captcha;
pub mod consent;
pub mod engine;
pub mod errors;
pub mod fillers;
pub mod merge;
pub mod selector;
pub mod summary;
pub mod values;

pub use engine::{FillOptions, FormFiller};
pub use errors::FillError;
pub use summary::FillRecorder;
pub use values::{FieldValues, MULTI_ROLE_SEPARATOR};
