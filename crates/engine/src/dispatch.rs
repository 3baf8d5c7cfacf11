//! Selector-scoped dispatch: the walk from the event target toward the
//! listener node.

use std::cmp::Reverse;

use tracing::error;

use crate::host::{Host, KeyPress};
use crate::registry::NormalizedBinding;

/// Walks the ancestor chain from the event's target to its current target,
/// invoking exact-match handlers in precedence order.
///
/// Precedence has two axes: nodes closer to the target win outright, and
/// within one node higher selector specificity wins, with registration order
/// breaking ties. The walk stops at the first handler that consumes; a
/// consuming handler also suppresses the event's default and propagation.
///
/// Returns whether any handler consumed the event.
pub(crate) fn dispatch_scoped<H: Host>(host: &H, exact: &[NormalizedBinding], event: &H::Event) -> bool {
	let current = event.current_target();
	let mut node = event.target();

	loop {
		let mut candidates: Vec<&NormalizedBinding> = exact
			.iter()
			.filter(|binding| host.selector_matches(&node, &binding.selector))
			.collect();
		candidates.sort_by_key(|binding| Reverse(binding.specificity));

		for binding in candidates {
			if invoke(binding) {
				event.prevent_default();
				event.stop_propagation();
				return true;
			}
		}

		if node == current {
			return false;
		}
		match host.parent(&node) {
			Some(parent) => node = parent,
			None => return false,
		}
	}
}

/// Whether any of the given bindings' selectors match a node on the event's
/// path from target to current target.
///
/// A partial match whose selectors all miss the path is dead: holding the
/// event for it would stall propagation for unrelated scopes.
pub(crate) fn any_on_path<H: Host>(host: &H, bindings: &[NormalizedBinding], event: &H::Event) -> bool {
	let current = event.current_target();
	let mut node = event.target();

	loop {
		if bindings.iter().any(|binding| host.selector_matches(&node, &binding.selector)) {
			return true;
		}
		if node == current {
			return false;
		}
		match host.parent(&node) {
			Some(parent) => node = parent,
			None => return false,
		}
	}
}

/// Invokes one handler, mapping absence and errors to a declining return.
fn invoke(binding: &NormalizedBinding) -> bool {
	let Some(handler) = &binding.handler else {
		return false;
	};
	match handler(binding.args.as_deref()) {
		Ok(consumed) => consumed,
		Err(error) => {
			error!(selector = %binding.selector, %error, "binding handler failed");
			false
		}
	}
}
