//! Transient matching state for the session in progress.

use vellum_keys::Stroke;

use crate::host::TimerToken;
use crate::registry::NormalizedBinding;

/// The best exact match captured while a partial is still live, committed if
/// the pending window expires without disambiguation.
#[derive(Debug)]
pub(crate) struct Deferred<E> {
	/// Exact candidate set for the sequence at the moment it was captured.
	pub exact: Vec<NormalizedBinding>,
	/// The event the candidates matched against.
	pub event: E,
}

/// Mutable per-engine matching state.
///
/// Constructed empty, reset to empty on abort, on commit, and on dispose.
#[derive(Debug)]
pub(crate) struct PendingState<E> {
	/// Accumulated strokes; empty when idle.
	pub sequence: Vec<Stroke>,
	/// Captured exact snapshot, if any.
	pub deferred: Option<Deferred<E>>,
	/// Events whose default was prevented while a partial was held, in
	/// arrival order.
	pub suppressed: Vec<E>,
	/// Currently armed pending-window timer.
	pub timer: Option<TimerToken>,
}

impl<E> PendingState<E> {
	pub fn new() -> Self {
		Self {
			sequence: Vec::new(),
			deferred: None,
			suppressed: Vec::new(),
			timer: None,
		}
	}

	/// Clears the accumulated sequence and snapshot, handing back the
	/// suppressed events and the armed timer for the caller to settle.
	pub fn reset(&mut self) -> (Vec<E>, Option<TimerToken>) {
		self.sequence.clear();
		self.deferred = None;
		(std::mem::take(&mut self.suppressed), self.timer.take())
	}
}
