//! Simulated key-press events with shared-reference semantics.

use std::cell::Cell;
use std::rc::Rc;

use vellum_engine::KeyPress;
use vellum_keys::KeyInput;

use crate::dom::NodeId;

#[derive(Debug)]
struct EventInner {
	input: KeyInput,
	target: NodeId,
	current_target: Cell<NodeId>,
	default_prevented: Cell<bool>,
	propagation_stopped: Cell<bool>,
	/// Set on replay clones.
	synthetic: bool,
}

/// A key-press event delivered through the simulated document.
///
/// Clones alias the same event object, so muting it through one reference is
/// observable through all of them, the way a shared DOM event behaves.
#[derive(Debug, Clone)]
pub struct SimKeyEvent {
	inner: Rc<EventInner>,
}

impl SimKeyEvent {
	pub(crate) fn new(input: KeyInput, target: NodeId) -> Self {
		Self {
			inner: Rc::new(EventInner {
				input,
				target,
				current_target: Cell::new(target),
				default_prevented: Cell::new(false),
				propagation_stopped: Cell::new(false),
				synthetic: false,
			}),
		}
	}

	/// Fabricates the faithful clone replay dispatches: same key identity,
	/// modifier flags, and target, with delivery state reset.
	pub(crate) fn replay_clone(&self) -> Self {
		Self {
			inner: Rc::new(EventInner {
				input: self.inner.input.clone(),
				target: self.inner.target,
				current_target: Cell::new(self.inner.target),
				default_prevented: Cell::new(false),
				propagation_stopped: Cell::new(false),
				synthetic: true,
			}),
		}
	}

	pub(crate) fn set_current_target(&self, node: NodeId) {
		self.inner.current_target.set(node);
	}

	/// The primary key identifier.
	pub fn key(&self) -> &str {
		&self.inner.input.key
	}

	/// Whether `preventDefault` was invoked.
	pub fn default_prevented(&self) -> bool {
		self.inner.default_prevented.get()
	}

	/// Whether `stopPropagation` was invoked.
	pub fn propagation_stopped(&self) -> bool {
		self.inner.propagation_stopped.get()
	}

	/// Whether this event is a replay clone rather than original input.
	pub fn is_synthetic(&self) -> bool {
		self.inner.synthetic
	}
}

impl KeyPress for SimKeyEvent {
	type Node = NodeId;

	fn target(&self) -> NodeId {
		self.inner.target
	}

	fn current_target(&self) -> NodeId {
		self.inner.current_target.get()
	}

	fn input(&self) -> KeyInput {
		self.inner.input.clone()
	}

	fn prevent_default(&self) {
		self.inner.default_prevented.set(true);
	}

	fn stop_propagation(&self) {
		self.inner.propagation_stopped.set(true);
	}
}
