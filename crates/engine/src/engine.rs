//! The dispatcher engine: sequence accumulation, ambiguity timer, replay.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use tracing::debug;
use vellum_keys::Layout;

use crate::dispatch::{any_on_path, dispatch_scoped};
use crate::host::{Host, KeyPress, TimerToken};
use crate::matcher::classify;
use crate::pending::{Deferred, PendingState};
use crate::registry::{Binding, NormalizedBinding, ProblemKind, Registry, RegistrationHandle, RegistrationProblem};
use crate::spec::{ActionTable, KeymapSpec};

/// How long a partial match is held awaiting disambiguation, measured from
/// the last stroke that extended it.
pub const PENDING_WINDOW: Duration = Duration::from_secs(1);

/// Keyboard shortcut dispatcher for one document tree.
///
/// The host forwards key-press events to [`process`](Self::process) from its
/// own listener and timer expiries to [`handle_timeout`](Self::handle_timeout).
/// All state transitions happen on the host's event loop; the engine is
/// re-entrant only with respect to replay, which is serialized by an internal
/// flag.
pub struct Engine<H: Host> {
	layout: Layout,
	registry: RefCell<Registry>,
	pending: RefCell<PendingState<H::Event>>,
	/// While set, events entering [`process`](Self::process) are returned to
	/// immediately and untouched.
	replaying: Cell<bool>,
	disposed: Cell<bool>,
	timer_seq: Cell<u64>,
}

impl<H: Host> Default for Engine<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H: Host> Engine<H> {
	/// Creates an engine with the default US-English layout.
	pub fn new() -> Self {
		Self::with_layout(Layout::default())
	}

	/// Creates an engine with an explicit keyboard layout.
	pub fn with_layout(layout: Layout) -> Self {
		Self {
			layout,
			registry: RefCell::new(Registry::new()),
			pending: RefCell::new(PendingState::new()),
			replaying: Cell::new(false),
			disposed: Cell::new(false),
			timer_seq: Cell::new(0),
		}
	}

	/// The configured keyboard layout.
	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	/// Registers a batch of bindings.
	///
	/// Bindings that fail normalization (invalid selector, empty sequence, or
	/// a stroke rejected by the canonicalizer) are skipped with a recorded
	/// diagnostic; the rest of the batch still registers. The returned handle
	/// revokes exactly the accepted members of this batch.
	pub fn register(&self, host: &H, bindings: Vec<Binding>) -> RegistrationHandle {
		let mut registry = self.registry.borrow_mut();
		let batch = registry.begin_batch();

		for (index, binding) in bindings.into_iter().enumerate() {
			match self.normalize(host, binding, batch) {
				Ok(normalized) => registry.push(normalized),
				Err((kind, message)) => registry.record_problem(index, kind, message),
			}
		}

		RegistrationHandle { batch }
	}

	/// Registers a declarative keymap spec, resolving action names through
	/// `actions`.
	///
	/// Entries naming an unknown action are skipped with a recorded
	/// diagnostic, like any other invalid binding.
	pub fn register_spec(&self, host: &H, spec: &KeymapSpec, actions: &ActionTable) -> RegistrationHandle {
		let mut bindings = Vec::with_capacity(spec.bindings.len());
		let mut unknown = Vec::new();

		for (index, entry) in spec.bindings.iter().enumerate() {
			let Some(handler) = actions.get(&entry.action) else {
				unknown.push((index, entry.action.clone()));
				continue;
			};
			bindings.push(Binding {
				sequence: entry.keys.split_whitespace().map(str::to_owned).collect(),
				selector: entry.selector.clone(),
				handler: Some(handler),
				args: None,
			});
		}

		let handle = self.register(host, bindings);
		let mut registry = self.registry.borrow_mut();
		for (index, action) in unknown {
			registry.record_problem(
				index,
				ProblemKind::UnknownActionTarget,
				format!("unknown action target {action:?}"),
			);
		}
		handle
	}

	/// Revokes a registration batch. No-op if already revoked.
	///
	/// Revocation removes the batch from future match classification only:
	/// an already-captured deferred exact snapshot still dispatches on
	/// expiry, and the pending sequence is left running.
	pub fn unregister(&self, handle: &RegistrationHandle) {
		self.registry.borrow_mut().remove_batch(handle.batch);
	}

	/// Problems recorded by registration so far (capped sample).
	pub fn problems(&self) -> Vec<RegistrationProblem> {
		self.registry.borrow().problems().to_vec()
	}

	/// Number of strokes accumulated in the pending sequence.
	pub fn pending_key_count(&self) -> usize {
		self.pending.borrow().sequence.len()
	}

	/// Feeds one key-press event through the matching state machine.
	///
	/// The host calls this from its own key-press listener. Events that do
	/// not canonicalize to a stroke, and events arriving while the engine is
	/// replaying, pass through untouched.
	pub fn process(&self, host: &H, event: &H::Event) {
		if self.replaying.get() || self.disposed.get() {
			return;
		}
		let Some(stroke) = self.layout.canonicalize(&event.input()) else {
			return;
		};

		let matched = {
			let registry = self.registry.borrow();
			let mut pending = self.pending.borrow_mut();
			pending.sequence.push(stroke);
			classify(&registry, &pending.sequence)
		};

		let partial_live = !matched.partial.is_empty() && any_on_path(host, &matched.partial, event);

		if partial_live {
			// Hold the event: it may complete a longer sequence.
			event.prevent_default();
			event.stop_propagation();

			let mut pending = self.pending.borrow_mut();
			pending.suppressed.push(event.clone());
			pending.deferred = if matched.exact.is_empty() {
				None
			} else {
				Some(Deferred {
					exact: matched.exact,
					event: event.clone(),
				})
			};
			self.arm_timer(host, &mut pending);
			debug!(
				keys = pending.sequence.len(),
				deferred = pending.deferred.is_some(),
				"holding partial match"
			);
			return;
		}

		if !matched.exact.is_empty() {
			// Commit: the sequence is recognized, so strokes suppressed on
			// the way here were part of it and are not replayed.
			self.abort(host);
			debug!(candidates = matched.exact.len(), "dispatching exact match");
			dispatch_scoped(host, &matched.exact, event);
			return;
		}

		// Dead end: release anything held and let this event pass untouched.
		let suppressed = self.abort(host);
		self.replay_all(host, suppressed);
	}

	/// Delivers a pending-window timer expiry.
	///
	/// Expiries for stale or cancelled tokens are ignored, so the host may
	/// deliver a due timer and a fresh key event in either order.
	pub fn handle_timeout(&self, host: &H, token: TimerToken) {
		if self.disposed.get() {
			return;
		}

		let (deferred, suppressed) = {
			let mut pending = self.pending.borrow_mut();
			if pending.timer != Some(token) {
				return;
			}
			pending.timer = None;
			let deferred = pending.deferred.take();
			let (suppressed, _) = pending.reset();
			(deferred, suppressed)
		};

		match deferred {
			Some(snapshot) => {
				// Suppressed events are consumed by the committed match;
				// their default behavior is intentionally dropped.
				debug!(candidates = snapshot.exact.len(), "committing deferred exact match");
				dispatch_scoped(host, &snapshot.exact, &snapshot.event);
			}
			None => {
				debug!(events = suppressed.len(), "pending window expired without a match");
				self.replay_all(host, suppressed);
			}
		}
	}

	/// Tears the engine down: cancels the timer and drops all pending state.
	/// Subsequent calls to [`process`](Self::process) and
	/// [`handle_timeout`](Self::handle_timeout) are no-ops.
	pub fn dispose(&self, host: &H) {
		self.abort(host);
		self.disposed.set(true);
	}

	/// Clears pending state and cancels the armed timer, returning the
	/// events that were suppressed.
	fn abort(&self, host: &H) -> Vec<H::Event> {
		let (suppressed, timer) = self.pending.borrow_mut().reset();
		if let Some(token) = timer {
			host.clear_timer(token);
		}
		suppressed
	}

	/// Restarts the pending-window timer under a fresh token.
	fn arm_timer(&self, host: &H, pending: &mut PendingState<H::Event>) {
		if let Some(token) = pending.timer.take() {
			host.clear_timer(token);
		}
		let token = TimerToken(self.timer_seq.get());
		self.timer_seq.set(token.0 + 1);
		pending.timer = Some(token);
		host.set_timer(token, PENDING_WINDOW);
	}

	/// Redelivers suppressed events in order, guarding against re-entry.
	fn replay_all(&self, host: &H, events: Vec<H::Event>) {
		if events.is_empty() {
			return;
		}
		self.replaying.set(true);
		for event in &events {
			host.replay(event);
		}
		self.replaying.set(false);
	}

	fn normalize(&self, host: &H, binding: Binding, batch: crate::registry::BatchId) -> Result<NormalizedBinding, (ProblemKind, String)> {
		if binding.sequence.is_empty() {
			return Err((ProblemKind::InvalidKeySequence, "empty key sequence".to_string()));
		}

		let mut sequence = Vec::with_capacity(binding.sequence.len());
		for raw in &binding.sequence {
			match self.layout.normalize(raw) {
				Ok(stroke) => sequence.push(stroke),
				Err(error) => {
					return Err((ProblemKind::InvalidKeySequence, format!("{raw:?}: {error}")));
				}
			}
		}

		if !host.is_valid_selector(&binding.selector) {
			return Err((ProblemKind::InvalidSelector, format!("invalid selector {:?}", binding.selector)));
		}
		let specificity = host.specificity(&binding.selector);

		Ok(NormalizedBinding {
			sequence: sequence.into(),
			selector: binding.selector.into(),
			specificity,
			handler: binding.handler,
			args: binding.args,
			batch,
		})
	}
}
