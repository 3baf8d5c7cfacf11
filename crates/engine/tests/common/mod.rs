//! Shared wiring for engine integration tests: a three-level document with
//! the engine listening mid-tree and a log listener at the root.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use vellum_engine::Engine;
use vellum_keys::KeyInput;
use vellum_simdom::{NodeId, SimHost, SimKeyEvent};

/// One observed root-listener delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
	pub key: String,
	pub ctrl: bool,
	pub synthetic: bool,
}

pub struct Fixture {
	pub host: Rc<SimHost>,
	pub engine: Rc<Engine<SimHost>>,
	/// `div#n` under `main#app` under the root — the usual event target.
	pub n: NodeId,
	seen: Rc<RefCell<Vec<Seen>>>,
}

impl Fixture {
	pub fn new() -> Self {
		let host = Rc::new(SimHost::new());
		let engine = Rc::new(Engine::new());

		let root = host.create_element("html", None);
		let app = host.create_element("main", Some(root));
		host.set_id(app, "app");
		let n = host.create_element("div", Some(app));
		host.set_id(n, "n");

		{
			let engine = Rc::clone(&engine);
			let host_ref = Rc::clone(&host);
			host.on_key(app, move |event| engine.process(&*host_ref, event));
		}

		let seen = Rc::new(RefCell::new(Vec::new()));
		{
			let seen = Rc::clone(&seen);
			host.on_key(root, move |event| {
				seen.borrow_mut().push(Seen {
					key: event.key().to_string(),
					ctrl: event_ctrl(event),
					synthetic: event.is_synthetic(),
				});
			});
		}

		Self { host, engine, n, seen }
	}

	/// Dispatches a plain key press at `div#n`.
	pub fn press(&self, key: &str) -> SimKeyEvent {
		self.press_at(self.n, KeyInput::new(key))
	}

	/// Dispatches an arbitrary key input at a node.
	pub fn press_at(&self, target: NodeId, input: KeyInput) -> SimKeyEvent {
		self.host.dispatch_key(target, input)
	}

	/// Advances the clock, delivering any due timers to the engine.
	pub fn advance(&self, millis: u64) {
		for token in self.host.advance(millis) {
			self.engine.handle_timeout(&self.host, token);
		}
	}

	/// Keys the root listener observed, in order.
	pub fn seen_keys(&self) -> Vec<String> {
		self.seen.borrow().iter().map(|s| s.key.clone()).collect()
	}

	/// Full root-listener log.
	pub fn seen(&self) -> Vec<Seen> {
		self.seen.borrow().clone()
	}
}

fn event_ctrl(event: &SimKeyEvent) -> bool {
	use vellum_engine::KeyPress;
	event.input().ctrl
}
