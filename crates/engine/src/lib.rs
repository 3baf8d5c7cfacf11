//! Selector-scoped keyboard shortcut dispatcher for document-oriented UIs.
//!
//! The engine consumes raw key-press events forwarded by the host and invokes
//! registered command handlers whose declared stroke sequences match:
//!
//! * [`Engine`] — sequence accumulation, ambiguity timer, event replay
//! * [`Binding`] — a stroke sequence scoped to a selector, with a handler
//! * [`Host`] / [`KeyPress`] — the seams to the surrounding document model:
//!   selector matching, ancestor walk, timers, and replay delivery
//! * [`KeymapSpec`] — declarative binding sets resolved against an
//!   [`ActionTable`]
//!
//! The engine installs no listeners of its own: the host forwards events to
//! [`Engine::process`] and timer expiries to [`Engine::handle_timeout`].

pub use engine::{Engine, PENDING_WINDOW};
pub use host::{Host, KeyPress, TimerToken};
pub use registry::{Binding, Handler, HandlerError, ProblemKind, RegistrationHandle, RegistrationProblem};
pub use spec::{ActionTable, BindingSpec, KeymapSpec};
pub use vellum_keys as keys;

mod dispatch;
mod engine;
mod host;
mod matcher;
mod pending;
mod registry;
mod spec;
