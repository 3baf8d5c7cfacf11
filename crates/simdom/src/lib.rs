//! In-memory document host for exercising the vellum engine.
//!
//! Provides the collaborators the engine consumes through its host seams,
//! small enough to assert against in tests:
//!
//! * an element tree with tag / `#id` / `.class` data and parent links
//! * a compound simple-selector engine with CSS-like specificity
//! * bubbling key-event delivery with `preventDefault` / `stopPropagation`
//!   semantics and faithful clone-based replay
//! * a manually advanced clock standing in for the host's delayed-callback
//!   facility

pub use dom::NodeId;
pub use event::SimKeyEvent;
pub use host::SimHost;
pub use selector::{Selector, SelectorError};

mod dom;
mod event;
mod host;
mod selector;
