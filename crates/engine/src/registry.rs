//! Binding registry: normalized bindings, batch handles, and registration
//! diagnostics.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use tracing::warn;
use vellum_keys::Stroke;

/// Error type a handler may surface; caught and logged by the dispatcher.
pub type HandlerError = Box<dyn std::error::Error>;

/// A command handler. Receives the binding's `args` and returns whether it
/// consumed the event; `Err` is treated as a falsy return after logging.
pub type Handler = Rc<dyn Fn(Option<&dyn Any>) -> Result<bool, HandlerError>>;

/// A user-authored binding: an ordered stroke sequence scoped to a selector.
#[derive(Clone)]
pub struct Binding {
	/// Stroke strings in the canonicalizer's grammar, one per stroke.
	pub sequence: Vec<String>,
	/// Selector in the host document's selector language.
	pub selector: String,
	/// Handler invoked when the binding fires. A missing handler is treated
	/// as declining the event without invocation.
	pub handler: Option<Handler>,
	/// Opaque value passed to the handler.
	pub args: Option<Rc<dyn Any>>,
}

impl Binding {
	/// Create a binding with a handler and no args.
	pub fn new<S, I>(
		sequence: I,
		selector: impl Into<String>,
		handler: impl Fn(Option<&dyn Any>) -> Result<bool, HandlerError> + 'static,
	) -> Self
	where
		S: Into<String>,
		I: IntoIterator<Item = S>,
	{
		Self {
			sequence: sequence.into_iter().map(Into::into).collect(),
			selector: selector.into(),
			handler: Some(Rc::new(handler)),
			args: None,
		}
	}

	/// Attach an opaque args value passed to the handler on fire.
	pub fn with_args(self, args: impl Any) -> Self {
		Self {
			args: Some(Rc::new(args)),
			..self
		}
	}
}

impl fmt::Debug for Binding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Binding")
			.field("sequence", &self.sequence)
			.field("selector", &self.selector)
			.field("handler", &self.handler.is_some())
			.finish_non_exhaustive()
	}
}

/// Identifies the batch a binding was registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct BatchId(u64);

/// Revocation capability returned from registration.
///
/// Passing it to [`Engine::unregister`](crate::Engine::unregister) removes
/// exactly the bindings that registered in that batch; revoking twice is a
/// no-op.
#[derive(Debug, Clone)]
pub struct RegistrationHandle {
	pub(crate) batch: BatchId,
}

/// A binding accepted into the registry.
#[derive(Clone)]
pub(crate) struct NormalizedBinding {
	/// Canonicalized stroke sequence; never empty.
	pub sequence: Rc<[Stroke]>,
	/// Validated selector.
	pub selector: Rc<str>,
	/// Selector specificity, fixed for the binding's lifetime.
	pub specificity: u32,
	pub handler: Option<Handler>,
	pub args: Option<Rc<dyn Any>>,
	pub batch: BatchId,
}

impl fmt::Debug for NormalizedBinding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NormalizedBinding")
			.field("sequence", &self.sequence)
			.field("selector", &self.selector)
			.field("specificity", &self.specificity)
			.finish_non_exhaustive()
	}
}

/// Classification of a registration problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
	/// A stroke string couldn't be parsed, or the sequence was empty.
	InvalidKeySequence,
	/// The selector failed validation.
	InvalidSelector,
	/// A declarative spec named an action missing from the action table.
	UnknownActionTarget,
}

/// A non-fatal problem encountered while registering a batch.
///
/// The offending binding is skipped; the rest of the batch still registers.
#[derive(Debug, Clone)]
pub struct RegistrationProblem {
	/// Index of the binding within its batch.
	pub index: usize,
	pub kind: ProblemKind,
	pub message: String,
}

impl fmt::Display for RegistrationProblem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "binding #{}: {}", self.index, self.message)
	}
}

/// Flat ordered collection of normalized bindings.
///
/// Iteration order is insertion order across batches; ranking ties are broken
/// downstream by first-registered wins, which makes the order observable.
pub(crate) struct Registry {
	bindings: Vec<NormalizedBinding>,
	problems: Vec<RegistrationProblem>,
	next_batch: u64,
}

impl Registry {
	pub fn new() -> Self {
		Self {
			bindings: Vec::new(),
			problems: Vec::new(),
			next_batch: 0,
		}
	}

	/// Mints the id for the next registration batch.
	pub fn begin_batch(&mut self) -> BatchId {
		let id = BatchId(self.next_batch);
		self.next_batch += 1;
		id
	}

	pub fn push(&mut self, binding: NormalizedBinding) {
		self.bindings.push(binding);
	}

	/// Removes every binding registered under `batch`. Idempotent.
	pub fn remove_batch(&mut self, batch: BatchId) {
		self.bindings.retain(|b| b.batch != batch);
	}

	pub fn bindings(&self) -> &[NormalizedBinding] {
		&self.bindings
	}

	/// Records a skipped binding and emits a warning to the diagnostic sink.
	pub fn record_problem(&mut self, index: usize, kind: ProblemKind, message: String) {
		warn!(index, ?kind, %message, "skipping invalid binding");
		if self.problems.len() < 50 {
			self.problems.push(RegistrationProblem { index, kind, message });
		}
	}

	pub fn problems(&self) -> &[RegistrationProblem] {
		&self.problems
	}
}
