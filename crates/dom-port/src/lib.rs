//! Abstract page/DOM capability consumed by the autofill engine.
//!
//! The engine never talks to a concrete automation backend. It sees a
//! [`DomPort`]: enumerate document contexts, query elements by selector,
//! read element state, and perform the three write operations (fill, check,
//! select). Any backend that can implement this surface (CDP, WebDriver,
//! or the bundled in-memory snapshot DOM) can host a fill pass.

pub mod errors;
pub mod frame;
pub mod matcher;
pub mod memory;
pub mod port;

pub use errors::DomError;
pub use frame::{walk_breadth_first, ContextId, FrameNode};
pub use memory::{ContextSnapshot, ElementSnapshot, MemoryDom, PageSnapshot};
pub use port::{DomPort, ElementId, SelectChoice};
