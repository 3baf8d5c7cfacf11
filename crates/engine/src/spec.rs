//! Declarative keymap specification schema.
//!
//! Defines the serde-friendly format for binding sets authored in config
//! files: each entry maps a key-sequence string and a selector to a named
//! action, resolved against an [`ActionTable`] at registration time.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::registry::{Handler, HandlerError};

/// A complete declarative binding set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeymapSpec {
	/// Key-to-action bindings.
	#[serde(default)]
	pub bindings: Vec<BindingSpec>,
}

/// A single declarative binding: key sequence + selector + action name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingSpec {
	/// Whitespace-separated stroke sequence (e.g., `"g g"`, `"ctrl-;"`).
	pub keys: String,
	/// Selector scoping the binding.
	pub selector: String,
	/// Action name resolved through the [`ActionTable`].
	pub action: String,
}

/// Maps action names to handlers for declarative registration.
#[derive(Default)]
pub struct ActionTable {
	actions: HashMap<String, Handler>,
}

impl ActionTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a named action, replacing any previous handler of the same
	/// name.
	pub fn insert(
		&mut self,
		name: impl Into<String>,
		handler: impl Fn(Option<&dyn Any>) -> Result<bool, HandlerError> + 'static,
	) {
		self.actions.insert(name.into(), Rc::new(handler));
	}

	/// Looks up a named action.
	pub fn get(&self, name: &str) -> Option<Handler> {
		self.actions.get(name).cloned()
	}

	/// Number of registered actions.
	pub fn len(&self) -> usize {
		self.actions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}
}
