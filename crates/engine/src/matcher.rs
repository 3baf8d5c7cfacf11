//! Pure classification of an accumulated stroke sequence against the
//! registry.

use vellum_keys::Stroke;

use crate::registry::{NormalizedBinding, Registry};

/// How one binding relates to the accumulated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StrokeMatch {
	/// The binding's sequence equals the accumulated sequence.
	Exact,
	/// The accumulated sequence is a proper prefix of the binding's.
	Partial,
	/// No relation.
	None,
}

/// Exact and partial matches for a sequence, in registry order.
#[derive(Debug, Default)]
pub(crate) struct MatchSet {
	pub exact: Vec<NormalizedBinding>,
	pub partial: Vec<NormalizedBinding>,
}

impl MatchSet {
	pub fn is_empty(&self) -> bool {
		self.exact.is_empty() && self.partial.is_empty()
	}
}

/// Classifies one binding by prefix-wise comparison.
pub(crate) fn classify_binding(binding: &NormalizedBinding, sequence: &[Stroke]) -> StrokeMatch {
	if binding.sequence.len() < sequence.len() {
		return StrokeMatch::None;
	}
	if binding.sequence[..sequence.len()] != *sequence {
		return StrokeMatch::None;
	}
	if binding.sequence.len() == sequence.len() {
		StrokeMatch::Exact
	} else {
		StrokeMatch::Partial
	}
}

/// Classifies every registered binding against `sequence`.
///
/// Pure over the registry snapshot and the sequence; the returned lists
/// preserve registry order.
pub(crate) fn classify(registry: &Registry, sequence: &[Stroke]) -> MatchSet {
	let mut set = MatchSet::default();
	for binding in registry.bindings() {
		match classify_binding(binding, sequence) {
			StrokeMatch::Exact => set.exact.push(binding.clone()),
			StrokeMatch::Partial => set.partial.push(binding.clone()),
			StrokeMatch::None => {}
		}
	}
	set
}
