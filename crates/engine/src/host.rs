//! Host-environment seams consumed by the engine.
//!
//! The engine never observes the document directly: selector matching, the
//! ancestor walk, timer scheduling, and replay delivery all go through
//! [`Host`]. Key-press events are read through [`KeyPress`].

use std::time::Duration;

use vellum_keys::KeyInput;

/// Identifies one scheduled pending-window timer.
///
/// Tokens are generational: the engine mints a fresh token every time the
/// window restarts, and a timeout delivered for anything but the current
/// token is ignored. Either ordering of a due timer against a freshly
/// arriving key event therefore yields correct state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub(crate) u64);

impl TimerToken {
	/// Builds a token from its raw value. Hosts normally treat tokens as
	/// opaque; this exists for hosts that key their timer tables by integer.
	pub const fn from_raw(raw: u64) -> Self {
		Self(raw)
	}

	/// The raw token value.
	pub const fn as_raw(self) -> u64 {
		self.0
	}
}

/// A key-press event as delivered by the host.
///
/// Cloning must be cheap and must alias the underlying event object, the way
/// a DOM event reference does: `prevent_default` through one clone is
/// observable through all of them.
pub trait KeyPress: Clone {
	/// Document node type carried by the event.
	type Node: Clone + PartialEq;

	/// The node the event originated on.
	fn target(&self) -> Self::Node;

	/// The node whose listener forwarded the event to the engine.
	fn current_target(&self) -> Self::Node;

	/// Primary key identifier and modifier flags.
	fn input(&self) -> KeyInput;

	/// Suppress the host's default handling of this event.
	fn prevent_default(&self);

	/// Stop the event from reaching later listeners.
	fn stop_propagation(&self);
}

/// The document tree, selector engine, and scheduling facilities the engine
/// runs against.
///
/// All methods take `&self`: the engine is re-entered synchronously during
/// replay, so hosts use interior mutability where they need state.
pub trait Host {
	/// Document node handle.
	type Node: Clone + PartialEq;
	/// Key-press event type.
	type Event: KeyPress<Node = Self::Node>;

	/// The parent of `node`, or `None` at the tree root.
	fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

	/// Whether `selector` is syntactically valid.
	fn is_valid_selector(&self, selector: &str) -> bool;

	/// Numeric specificity of a valid selector; monotone in selector
	/// specificity.
	fn specificity(&self, selector: &str) -> u32;

	/// Whether `node` matches `selector`.
	fn selector_matches(&self, node: &Self::Node, selector: &str) -> bool;

	/// Schedule a delayed callback: after `after`, the host must invoke
	/// [`Engine::handle_timeout`](crate::Engine::handle_timeout) with `token`.
	/// The fire time must not precede the scheduling time.
	fn set_timer(&self, token: TimerToken, after: Duration);

	/// Cancel a previously scheduled timer. Cancelling a timer that already
	/// fired is a no-op.
	fn clear_timer(&self, token: TimerToken);

	/// Redeliver a suppressed event as if the engine had never interfered.
	///
	/// The host must dispatch a faithful clone on the original target:
	/// same type, bubbling, cancelability, key identity, and modifier
	/// flags. Cloning is required because some environments zero out
	/// discriminating fields when a muted event object is redispatched.
	fn replay(&self, event: &Self::Event);
}
