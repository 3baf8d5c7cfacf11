//! The simulated host: tree construction, listeners, bubbling delivery,
//! timers, and replay.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use vellum_engine::{Host, KeyPress, TimerToken};
use vellum_keys::KeyInput;

use crate::dom::{DocTree, NodeId};
use crate::event::SimKeyEvent;
use crate::selector::Selector;

type ListenerFn = Rc<dyn Fn(&SimKeyEvent)>;

struct Listener {
	node: NodeId,
	callback: ListenerFn,
}

/// An in-memory document plus the scheduling facilities the engine consumes.
///
/// All interior state uses cells so the engine can re-enter the host
/// synchronously during replay. Time is manual: nothing fires until
/// [`advance`](Self::advance) is called.
#[derive(Default)]
pub struct SimHost {
	tree: RefCell<DocTree>,
	listeners: RefCell<Vec<Listener>>,
	clock: Cell<u64>,
	timers: RefCell<Vec<(TimerToken, u64)>>,
}

impl SimHost {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an element under `parent` (`None` for the root).
	pub fn create_element(&self, tag: &str, parent: Option<NodeId>) -> NodeId {
		self.tree.borrow_mut().insert(tag, parent)
	}

	/// Sets an element's id attribute.
	pub fn set_id(&self, node: NodeId, id: &str) {
		self.tree.borrow_mut().get_mut(node).id = Some(id.to_string());
	}

	/// Adds a class to an element.
	pub fn add_class(&self, node: NodeId, class: &str) {
		self.tree.borrow_mut().get_mut(node).classes.push(class.to_string());
	}

	/// Attaches a key-press listener to a node.
	pub fn on_key(&self, node: NodeId, callback: impl Fn(&SimKeyEvent) + 'static) {
		self.listeners.borrow_mut().push(Listener {
			node,
			callback: Rc::new(callback),
		});
	}

	/// Creates a key-press event targeted at `target` and bubbles it through
	/// the tree. Returns the event so callers can inspect its flags.
	pub fn dispatch_key(&self, target: NodeId, input: KeyInput) -> SimKeyEvent {
		let event = SimKeyEvent::new(input, target);
		self.deliver(&event);
		event
	}

	/// Advances the manual clock, returning the tokens of timers that fell
	/// due, in deadline order. The caller forwards them to the engine.
	pub fn advance(&self, millis: u64) -> Vec<TimerToken> {
		let now = self.clock.get() + millis;
		self.clock.set(now);

		let mut due: Vec<(TimerToken, u64)> = Vec::new();
		self.timers.borrow_mut().retain(|&(token, deadline)| {
			if deadline <= now {
				due.push((token, deadline));
				false
			} else {
				true
			}
		});
		due.sort_by_key(|&(_, deadline)| deadline);
		due.into_iter().map(|(token, _)| token).collect()
	}

	/// Bubbles an event from its target toward the root, honoring
	/// `stopPropagation` at node boundaries.
	fn deliver(&self, event: &SimKeyEvent) {
		let path = self.tree.borrow().ancestor_path(event.target());
		for node in path {
			if event.propagation_stopped() {
				break;
			}
			event.set_current_target(node);

			// Snapshot so listeners may attach or replay re-entrantly.
			let callbacks: Vec<ListenerFn> = self
				.listeners
				.borrow()
				.iter()
				.filter(|listener| listener.node == node)
				.map(|listener| Rc::clone(&listener.callback))
				.collect();
			for callback in callbacks {
				callback(event);
			}
		}
	}

	fn element_matches(&self, node: NodeId, selector: &str) -> bool {
		let Ok(parsed) = Selector::parse(selector) else {
			return false;
		};
		parsed.matches(self.tree.borrow().get(node))
	}
}

impl Host for SimHost {
	type Node = NodeId;
	type Event = SimKeyEvent;

	fn parent(&self, node: &NodeId) -> Option<NodeId> {
		self.tree.borrow().get(*node).parent
	}

	fn is_valid_selector(&self, selector: &str) -> bool {
		Selector::parse(selector).is_ok()
	}

	fn specificity(&self, selector: &str) -> u32 {
		Selector::parse(selector).map(|s| s.specificity()).unwrap_or(0)
	}

	fn selector_matches(&self, node: &NodeId, selector: &str) -> bool {
		self.element_matches(*node, selector)
	}

	fn set_timer(&self, token: TimerToken, after: Duration) {
		let deadline = self.clock.get() + after.as_millis() as u64;
		self.timers.borrow_mut().push((token, deadline));
	}

	fn clear_timer(&self, token: TimerToken) {
		self.timers.borrow_mut().retain(|&(t, _)| t != token);
	}

	fn replay(&self, event: &SimKeyEvent) {
		self.deliver(&event.replay_clone());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn input(key: &str) -> KeyInput {
		KeyInput::new(key)
	}

	#[test]
	fn events_bubble_from_target_to_root() {
		let host = SimHost::new();
		let root = host.create_element("main", None);
		let middle = host.create_element("section", Some(root));
		let leaf = host.create_element("div", Some(middle));

		let seen = Rc::new(RefCell::new(Vec::new()));
		for (node, label) in [(leaf, "leaf"), (middle, "middle"), (root, "root")] {
			let seen = Rc::clone(&seen);
			host.on_key(node, move |_| seen.borrow_mut().push(label));
		}

		host.dispatch_key(leaf, input("a"));
		assert_eq!(*seen.borrow(), ["leaf", "middle", "root"]);
	}

	#[test]
	fn stop_propagation_halts_bubbling() {
		let host = SimHost::new();
		let root = host.create_element("main", None);
		let leaf = host.create_element("div", Some(root));

		let root_saw = Rc::new(Cell::new(false));
		{
			let root_saw = Rc::clone(&root_saw);
			host.on_key(root, move |_| root_saw.set(true));
		}
		host.on_key(leaf, |event| event.stop_propagation());

		let event = host.dispatch_key(leaf, input("a"));
		assert!(event.propagation_stopped());
		assert!(!root_saw.get());
	}

	#[test]
	fn replay_delivers_a_reset_clone() {
		let host = SimHost::new();
		let root = host.create_element("main", None);

		let seen = Rc::new(RefCell::new(Vec::new()));
		{
			let seen = Rc::clone(&seen);
			host.on_key(root, move |event| {
				seen.borrow_mut().push((event.key().to_string(), event.is_synthetic(), event.default_prevented()));
			});
		}

		let original = host.dispatch_key(root, input("d"));
		original.prevent_default();
		host.replay(&original);

		let seen = seen.borrow();
		assert_eq!(seen.len(), 2);
		assert_eq!(seen[0], ("d".to_string(), false, false));
		// Clone carries the key but none of the muted state.
		assert_eq!(seen[1], ("d".to_string(), true, false));
	}

	#[test]
	fn advance_returns_due_timers_in_deadline_order() {
		let host = SimHost::new();
		let first = TimerToken::from_raw(1);
		let second = TimerToken::from_raw(2);
		host.set_timer(second, Duration::from_millis(500));
		host.set_timer(first, Duration::from_millis(200));

		assert!(host.advance(100).is_empty());
		assert_eq!(host.advance(150), vec![first]);
		host.clear_timer(second);
		assert!(host.advance(1000).is_empty());
	}
}
